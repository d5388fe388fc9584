//! Adapters - Implementations of port interfaces.
//!
//! - `events` - in-process event bus
//! - `memory` - lock-guarded stores for tests and database-less runs
//! - `postgres` - `sqlx` persistence
//! - `priority` - priority policies
//! - `http` - axum REST API

pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod priority;

pub use events::InMemoryEventBus;
pub use memory::{InMemoryComplaintStore, InMemoryNotificationStore, InMemoryUserDirectory};
pub use postgres::{PostgresComplaintStore, PostgresNotificationRepository, PostgresUserDirectory};
pub use priority::FixedPriorityPolicy;
