use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fridge item model - the star of the show
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FridgeItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    /// None means "does not expire"
    pub expiration_date: Option<NaiveDate>,
    pub category: String,
    pub is_favorite: bool,
}

impl FridgeItem {
    /// Build a new item with a fresh id. Blank categories collapse to "Other".
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity,
            expiration_date: None,
            category: "Other".to_string(),
            is_favorite: false,
        }
    }

    pub fn with_expiration(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize_category(category.into());
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = favorite;
        self
    }
}

/// Suggested categories shown in the add/edit form. Free text is still allowed;
/// this list is a hint, not a constraint.
pub const PREDEFINED_CATEGORIES: [&str; 10] = [
    "Dairy",
    "Meat",
    "Vegetables",
    "Fruits",
    "Beverages",
    "Snacks",
    "Frozen",
    "Condiments",
    "Grains",
    "Other",
];

/// Empty or whitespace-only categories become "Other"
pub fn normalize_category(category: String) -> String {
    if category.trim().is_empty() {
        "Other".to_string()
    } else {
        category
    }
}

/// What happened to an item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HistoryAction {
    Added,
    Removed,
    Updated,
}

impl HistoryAction {
    pub fn label(&self) -> &'static str {
        match self {
            HistoryAction::Added => "Added",
            HistoryAction::Removed => "Removed",
            HistoryAction::Updated => "Updated",
        }
    }

    /// Display color the history screen uses for this action
    pub fn color_code(&self) -> &'static str {
        match self {
            HistoryAction::Added => "green",
            HistoryAction::Removed => "red",
            HistoryAction::Updated => "blue",
        }
    }
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One line of the change history: a full snapshot of the item at the time of
/// the action. Snapshot, not reference - later edits to the live item must not
/// rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub item: FridgeItem,
    pub action: HistoryAction,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(item: &FridgeItem, action: HistoryAction) -> Self {
        Self::at(item, action, Utc::now())
    }

    /// Entry with an explicit timestamp, used by tests and backfills
    pub fn at(item: &FridgeItem, action: HistoryAction, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            item: item.clone(),
            action,
            timestamp,
        }
    }
}
