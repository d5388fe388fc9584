//! Duplicate clustering.
//!
//! Common-area complaints about the same fault on the same floor are folded
//! into one representative work item. The decision is pure; the store's
//! atomic primitives make it safe under concurrent submissions.

mod key;
mod resolver;

pub use key::ClusterKey;
pub use resolver::{resolve_cluster, ClusterDecision};
