//! Per-user notifications about complaint activity.

mod errors;
mod notice;
mod record;

pub use errors::NotificationError;
pub use notice::Notice;
pub use record::Notification;
