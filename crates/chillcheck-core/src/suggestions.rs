use crate::expiry::days_until;
use crate::models::FridgeItem;
use chrono::NaiveDate;

/// The "Use Today" view: items needing attention, split into three urgency
/// sections. Items without an expiration date never show up here.
#[derive(Debug, Clone, Default)]
pub struct UseTodayReport {
    /// Days until expiration < 0
    pub already_expired: Vec<FridgeItem>,
    /// Expires on the reference day
    pub expiring_today: Vec<FridgeItem>,
    /// 1-2 days out
    pub expiring_next_two_days: Vec<FridgeItem>,
}

impl UseTodayReport {
    /// Partition and sort the urgent items, most urgent first within each
    /// section
    pub fn build(items: &[FridgeItem], reference: NaiveDate) -> Self {
        let mut report = UseTodayReport::default();

        for item in items {
            let Some(expiration) = item.expiration_date else {
                continue;
            };
            let days = days_until(expiration, reference);
            if days < 0 {
                report.already_expired.push(item.clone());
            } else if days == 0 {
                report.expiring_today.push(item.clone());
            } else if days <= 2 {
                report.expiring_next_two_days.push(item.clone());
            }
        }

        report.already_expired.sort_by_key(|i| i.expiration_date);
        report.expiring_today.sort_by_key(|i| i.expiration_date);
        report.expiring_next_two_days.sort_by_key(|i| i.expiration_date);
        report
    }

    pub fn is_empty(&self) -> bool {
        self.already_expired.is_empty()
            && self.expiring_today.is_empty()
            && self.expiring_next_two_days.is_empty()
    }

    pub fn total(&self) -> usize {
        self.already_expired.len() + self.expiring_today.len() + self.expiring_next_two_days.len()
    }

    pub fn sections(&self) -> [(&'static str, &'static str, &Vec<FridgeItem>); 3] {
        [
            (
                "Already Expired",
                "Use immediately or discard",
                &self.already_expired,
            ),
            (
                "Expiring Today",
                "Perfect for today's meals",
                &self.expiring_today,
            ),
            (
                "Expiring in 1-2 Days",
                "Plan to use soon",
                &self.expiring_next_two_days,
            ),
        ]
    }

    /// Shown when nothing needs attention
    pub fn all_good_message() -> &'static str {
        "No items need urgent attention today. Your fridge items are staying fresh!"
    }
}
