//! Grievance Desk - facility maintenance complaints with duplicate clustering.
//!
//! Residents report faults; identical common-area reports collapse into a
//! cluster led by one representative complaint, and every transition an
//! admin or worker applies to the representative is seen by all reporters.
//!
//! Layout follows ports and adapters:
//!
//! - `domain` - complaint aggregate, lifecycle state machine, clustering
//! - `ports` - persistence, directory, policy and event contracts
//! - `application` - command and query handlers
//! - `adapters` - in-memory, Postgres, event bus and HTTP implementations
//! - `config` - environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
