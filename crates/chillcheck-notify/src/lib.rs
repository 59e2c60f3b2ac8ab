// Daily reminder machinery: content generation plus scheduling math. The
// actual OS delivery lives behind the ReminderBackend trait.
pub mod content;
pub mod scheduler;

pub use content::{generate_content, urgent_item_count, ReminderContent, APP_NAME};
pub use scheduler::{next_fire_time, NotifyError, ReminderBackend, ReminderScheduler};

pub type Result<T> = std::result::Result<T, NotifyError>;
