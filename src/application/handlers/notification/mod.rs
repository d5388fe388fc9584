//! Notification projection and inbox handlers.

mod list_notifications;
mod mark_notification_read;
mod notification_projector;

pub use list_notifications::{ListNotificationsHandler, INBOX_LIMIT};
pub use mark_notification_read::MarkNotificationReadHandler;
pub use notification_projector::{NotificationProjector, PROJECTED_EVENTS};
