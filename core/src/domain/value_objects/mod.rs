//! Value objects representing immutable domain concepts.

pub mod notification;

// Re-export commonly used types
pub use notification::{Notification, NotificationLevel, Route};
