//! Application layer - command and query handlers.
//!
//! Orchestrates domain operations over the ports. Writes go through the
//! `TransitionExecutor` or the clustering loop in `CreateComplaintHandler`;
//! reads resolve duplicates through their representatives.

pub mod handlers;

pub use handlers::*;
