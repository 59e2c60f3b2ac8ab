use crate::models::FridgeItem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whole-day difference between an expiration date and the reference date.
/// Negative means the date has already passed. Day granularity only - there is
/// no time-of-day component anywhere in this app.
pub fn days_until(expiration: NaiveDate, reference: NaiveDate) -> i64 {
    expiration.signed_duration_since(reference).num_days()
}

/// Urgency classification derived from days-until-expiration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExpiryStatus {
    /// No expiration date recorded
    NoDate,
    /// Days until expiration < 0
    Expired,
    /// 0-3 days: note that day 0 is both "expires today" and in this bucket
    ExpiringSoon,
    /// 4-7 days
    ExpiringThisWeek,
    /// 8+ days
    Fresh,
}

impl ExpiryStatus {
    /// Classify a day count. Partitions the integer day line with no gaps.
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d < 0 => ExpiryStatus::Expired,
            0..=3 => ExpiryStatus::ExpiringSoon,
            4..=7 => ExpiryStatus::ExpiringThisWeek,
            _ => ExpiryStatus::Fresh,
        }
    }

    /// Classify an item's (optional) expiration date against the reference date
    pub fn classify(expiration: Option<NaiveDate>, reference: NaiveDate) -> Self {
        match expiration {
            None => ExpiryStatus::NoDate,
            Some(date) => Self::from_days(days_until(date, reference)),
        }
    }

    pub fn color_code(&self) -> &'static str {
        match self {
            ExpiryStatus::NoDate => "gray",
            ExpiryStatus::Expired => "red",
            ExpiryStatus::ExpiringSoon => "red",
            ExpiryStatus::ExpiringThisWeek => "orange",
            ExpiryStatus::Fresh => "green",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryStatus::NoDate => "No Expiration",
            ExpiryStatus::Expired => "Expired",
            ExpiryStatus::ExpiringSoon => "Expiring Soon",
            ExpiryStatus::ExpiringThisWeek => "Expiring This Week",
            ExpiryStatus::Fresh => "Fresh",
        }
    }
}

/// Human-readable expiration line for an item, e.g. "Expires today" or
/// "Expired 2 days ago"
pub fn expiry_message(item: &FridgeItem, reference: NaiveDate) -> String {
    let Some(expiration) = item.expiration_date else {
        return "No expiration date set".to_string();
    };

    let days = days_until(expiration, reference);
    if days < 0 {
        let expired = days.abs();
        format!("Expired {} day{} ago", expired, plural(expired))
    } else if days == 0 {
        "Expires today".to_string()
    } else if days <= 7 {
        format!("Expires in {} day{}", days, plural(days))
    } else {
        format!("Fresh ({} days left)", days)
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
