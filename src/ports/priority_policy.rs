//! Priority assignment at creation.

use crate::domain::complaint::{ComplaintDraft, Priority};

/// Decides a new complaint's priority. Called once, before persistence.
pub trait PriorityPolicy: Send + Sync {
    fn assign(&self, draft: &ComplaintDraft) -> Priority;
}
