pub mod actions;
pub mod errors;
pub mod id;
pub mod notifications;
pub mod types;

pub use actions::{Action, ParseActionError};
pub use errors::{ConfigError, QuillError};
pub use id::{new_correlation_id, ChatId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use types::Tool;
