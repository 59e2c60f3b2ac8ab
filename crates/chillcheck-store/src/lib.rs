// Flat persistence layer - two JSON slots and nothing clever
pub mod store;

pub use store::{FridgeStore, StoreError, HISTORY_CAP};

pub type Result<T> = std::result::Result<T, StoreError>;
