use chillcheck_core::expiry::days_until;
use chillcheck_core::models::FridgeItem;
use chrono::NaiveDate;

/// Reminder title is always the application name
pub const APP_NAME: &str = "Chill Check";

/// Title/body pair for a scheduled reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderContent {
    pub title: String,
    pub body: String,
}

impl ReminderContent {
    fn with_body(body: impl Into<String>) -> Self {
        Self {
            title: APP_NAME.to_string(),
            body: body.into(),
        }
    }
}

/// Build the reminder body from the current fridge state. Items expiring on
/// the reference day take priority; only if none exist does the wider 0-3 day
/// window get a mention. Must be recomputed every time it is needed - stale
/// content is worse than no reminder.
pub fn generate_content(items: &[FridgeItem], reference: NaiveDate) -> ReminderContent {
    let expiring_today: Vec<&FridgeItem> = items
        .iter()
        .filter(|i| i.expiration_date == Some(reference))
        .collect();

    let expiring_soon: Vec<&FridgeItem> = items
        .iter()
        .filter(|i| match i.expiration_date {
            Some(date) => (0..=3).contains(&days_until(date, reference)),
            None => false,
        })
        .collect();

    if expiring_today.is_empty() && expiring_soon.is_empty() {
        return ReminderContent::with_body("All your fridge items are fresh today!");
    }

    if !expiring_today.is_empty() {
        if expiring_today.len() == 1 {
            return ReminderContent::with_body(format!(
                "{} expires today! Consider using it soon.",
                expiring_today[0].name
            ));
        }

        let names: Vec<&str> = expiring_today.iter().take(3).map(|i| i.name.as_str()).collect();
        let names = names.join(", ");
        let remaining = expiring_today.len().saturating_sub(3);

        return if remaining > 0 {
            ReminderContent::with_body(format!(
                "{} and {} more items expire today!",
                names, remaining
            ))
        } else {
            ReminderContent::with_body(format!("{} expire today!", names))
        };
    }

    if expiring_soon.len() == 1 {
        ReminderContent::with_body(format!(
            "{} expires soon! Plan to use it.",
            expiring_soon[0].name
        ))
    } else {
        ReminderContent::with_body(format!(
            "{} items are expiring soon. Check your fridge!",
            expiring_soon.len()
        ))
    }
}

/// Count of items needing attention within two days - drives the badge number
/// and the "Use Today (N)" menu counter
pub fn urgent_item_count(items: &[FridgeItem], reference: NaiveDate) -> usize {
    items
        .iter()
        .filter(|i| match i.expiration_date {
            Some(date) => days_until(date, reference) <= 2,
            None => false,
        })
        .count()
}
