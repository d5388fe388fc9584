//! Priority policies.

use crate::domain::complaint::{ComplaintDraft, Priority};
use crate::ports::PriorityPolicy;

/// Assigns the same priority to every new complaint.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPriorityPolicy {
    priority: Priority,
}

impl FixedPriorityPolicy {
    pub fn new(priority: Priority) -> Self {
        Self { priority }
    }
}

impl PriorityPolicy for FixedPriorityPolicy {
    fn assign(&self, _draft: &ComplaintDraft) -> Priority {
        self.priority
    }
}
