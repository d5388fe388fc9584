//! In-memory adapters.
//!
//! Used by tests and by deployments without a configured database.

mod complaint_store;
mod notification_store;
mod user_directory;

pub use complaint_store::InMemoryComplaintStore;
pub use notification_store::InMemoryNotificationStore;
pub use user_directory::InMemoryUserDirectory;
