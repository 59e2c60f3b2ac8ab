// Core business logic lives here - the brain of the operation
pub mod config;
pub mod error;
pub mod expiry;
pub mod filter;
pub mod models;
pub mod suggestions;

pub use config::Settings;
pub use error::Error;
pub use expiry::{days_until, ExpiryStatus};
pub use filter::{apply_filter, ExpiryFilter};
pub use models::{FridgeItem, HistoryAction, HistoryEntry};
pub use suggestions::UseTodayReport;

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
