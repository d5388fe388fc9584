//! PostgreSQL adapters.
//!
//! - `PostgresComplaintStore` - complaints, clusters and the transition audit trail
//! - `PostgresUserDirectory` - read-only user lookups
//! - `PostgresNotificationRepository` - per-user notifications
//!
//! Schema lives in `migrations/` and is applied with `sqlx::migrate!`.

mod complaint_store;
mod notification_repository;
mod user_directory;

pub use complaint_store::PostgresComplaintStore;
pub use notification_repository::PostgresNotificationRepository;
pub use user_directory::PostgresUserDirectory;
