//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, roles, errors, events, capability table)
//! - `complaint` - Complaint aggregate and lifecycle state machine
//! - `clustering` - Duplicate detection for common-area faults
//! - `user` - Read-only directory profiles and worker ranking
//! - `notification` - Per-user notifications
//! - `analytics` - Pipeline counters for administrators

pub mod analytics;
pub mod clustering;
pub mod complaint;
pub mod foundation;
pub mod notification;
pub mod user;
