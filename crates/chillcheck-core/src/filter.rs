use crate::expiry::ExpiryStatus;
use crate::models::FridgeItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expiry filter the list screen offers. The labels keep the original wording:
/// "Expiring Soon (1-3 days)" even though the predicate matches the 0-3 day
/// urgency bucket - the day-0 item shows under this filter too.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExpiryFilter {
    #[default]
    All,
    Expired,
    ExpiringSoon,
    ExpiringThisWeek,
    Fresh,
    NoExpiration,
}

impl ExpiryFilter {
    pub fn all() -> [ExpiryFilter; 6] {
        [
            ExpiryFilter::All,
            ExpiryFilter::Expired,
            ExpiryFilter::ExpiringSoon,
            ExpiryFilter::ExpiringThisWeek,
            ExpiryFilter::Fresh,
            ExpiryFilter::NoExpiration,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryFilter::All => "All Items",
            ExpiryFilter::Expired => "Expired",
            ExpiryFilter::ExpiringSoon => "Expiring Soon (1-3 days)",
            ExpiryFilter::ExpiringThisWeek => "Expiring This Week (4-7 days)",
            ExpiryFilter::Fresh => "Fresh (8+ days)",
            ExpiryFilter::NoExpiration => "No Expiration Date",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExpiryFilter::All => "Show all items in your fridge",
            ExpiryFilter::Expired => "Items that have already expired",
            ExpiryFilter::ExpiringSoon => "Items expiring in 1-3 days",
            ExpiryFilter::ExpiringThisWeek => "Items expiring in 4-7 days",
            ExpiryFilter::Fresh => "Items with 8 or more days left",
            ExpiryFilter::NoExpiration => "Items without expiration dates",
        }
    }

    pub fn color_code(&self) -> &'static str {
        match self {
            ExpiryFilter::All => "blue",
            ExpiryFilter::Expired => "red",
            ExpiryFilter::ExpiringSoon => "red",
            ExpiryFilter::ExpiringThisWeek => "orange",
            ExpiryFilter::Fresh => "green",
            ExpiryFilter::NoExpiration => "gray",
        }
    }

    /// Does this filter accept an item with the given status?
    fn matches(&self, status: ExpiryStatus) -> bool {
        match self {
            ExpiryFilter::All => true,
            ExpiryFilter::Expired => status == ExpiryStatus::Expired,
            ExpiryFilter::ExpiringSoon => status == ExpiryStatus::ExpiringSoon,
            ExpiryFilter::ExpiringThisWeek => status == ExpiryStatus::ExpiringThisWeek,
            ExpiryFilter::Fresh => status == ExpiryStatus::Fresh,
            ExpiryFilter::NoExpiration => status == ExpiryStatus::NoDate,
        }
    }
}

impl std::fmt::Display for ExpiryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Produce the display list: filter by expiry bucket, then by free-text search
/// over name/category, then sort favorites to the front. The sort is stable so
/// insertion order survives within each group.
pub fn apply_filter(
    items: &[FridgeItem],
    filter: ExpiryFilter,
    reference: NaiveDate,
    search: Option<&str>,
) -> Vec<FridgeItem> {
    let search = search.map(str::trim).filter(|s| !s.is_empty());

    let mut result: Vec<FridgeItem> = items
        .iter()
        .filter(|item| {
            let status = ExpiryStatus::classify(item.expiration_date, reference);
            filter.matches(status)
        })
        .filter(|item| match search {
            None => true,
            Some(text) => {
                let needle = text.to_lowercase();
                item.name.to_lowercase().contains(&needle)
                    || item.category.to_lowercase().contains(&needle)
            }
        })
        .cloned()
        .collect();

    result.sort_by_key(|item| !item.is_favorite);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_items(today: NaiveDate) -> Vec<FridgeItem> {
        vec![
            FridgeItem::new("Leftovers", 1).with_expiration(today - chrono::Duration::days(2)),
            FridgeItem::new("Milk", 1).with_expiration(today),
            FridgeItem::new("Eggs", 12).with_expiration(today + chrono::Duration::days(3)),
            FridgeItem::new("Cheese", 1).with_expiration(today + chrono::Duration::days(5)),
            FridgeItem::new("Juice", 2).with_expiration(today + chrono::Duration::days(14)),
            FridgeItem::new("Salt", 1),
        ]
    }

    #[test]
    fn test_all_keeps_everything() {
        let today = date(2025, 7, 20);
        let items = sample_items(today);
        let result = apply_filter(&items, ExpiryFilter::All, today, None);
        assert_eq!(result.len(), items.len());
    }

    #[test]
    fn test_bucket_filters() {
        let today = date(2025, 7, 20);
        let items = sample_items(today);

        let expired = apply_filter(&items, ExpiryFilter::Expired, today, None);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].name, "Leftovers");

        // Day 0 (Milk) and day 3 (Eggs) both land in Expiring Soon
        let soon = apply_filter(&items, ExpiryFilter::ExpiringSoon, today, None);
        let names: Vec<_> = soon.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Eggs"]);

        let week = apply_filter(&items, ExpiryFilter::ExpiringThisWeek, today, None);
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].name, "Cheese");

        let fresh = apply_filter(&items, ExpiryFilter::Fresh, today, None);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].name, "Juice");

        let no_date = apply_filter(&items, ExpiryFilter::NoExpiration, today, None);
        assert_eq!(no_date.len(), 1);
        assert_eq!(no_date[0].name, "Salt");
    }

    #[test]
    fn test_non_all_filters_partition_the_list() {
        let today = date(2025, 7, 20);
        let items = sample_items(today);

        let sum: usize = [
            ExpiryFilter::Expired,
            ExpiryFilter::ExpiringSoon,
            ExpiryFilter::ExpiringThisWeek,
            ExpiryFilter::Fresh,
            ExpiryFilter::NoExpiration,
        ]
        .iter()
        .map(|f| apply_filter(&items, *f, today, None).len())
        .sum();

        let all = apply_filter(&items, ExpiryFilter::All, today, None).len();
        assert_eq!(sum, all);
    }

    #[test]
    fn test_search_matches_name_and_category() {
        let today = date(2025, 7, 20);
        let items = vec![
            FridgeItem::new("Whole Milk", 1).with_category("Dairy"),
            FridgeItem::new("Orange Juice", 1).with_category("Beverages"),
            FridgeItem::new("Butter", 1).with_category("Dairy"),
        ];

        let by_name = apply_filter(&items, ExpiryFilter::All, today, Some("milk"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Whole Milk");

        let by_category = apply_filter(&items, ExpiryFilter::All, today, Some("DAIRY"));
        assert_eq!(by_category.len(), 2);

        // Blank search is the same as no search
        let blank = apply_filter(&items, ExpiryFilter::All, today, Some("   "));
        assert_eq!(blank.len(), 3);
    }

    #[test]
    fn test_favorites_sort_first_and_order_is_stable() {
        let today = date(2025, 7, 20);
        let items = vec![
            FridgeItem::new("A", 1),
            FridgeItem::new("B", 1).with_favorite(true),
            FridgeItem::new("C", 1),
            FridgeItem::new("D", 1).with_favorite(true),
        ];

        let result = apply_filter(&items, ExpiryFilter::All, today, None);
        let names: Vec<_> = result.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "A", "C"]);

        // No non-favorite ever precedes a favorite
        for pair in result.windows(2) {
            assert!(!(pair[1].is_favorite && !pair[0].is_favorite));
        }
    }
}
