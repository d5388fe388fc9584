//! Complaint status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Externally visible status of a representative complaint.
///
/// The worker's verdict is carried separately as a `WorkOutcome` so that
/// this enum stays a plain finite automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Pending,
    Rejected,
    Assigned,
    #[serde(rename = "In Progress")]
    InProgress,
    RequestedChanges,
    #[serde(rename = "Completed - Awaiting Admin Review")]
    AwaitingReview,
    Completed,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 7] = [
        ComplaintStatus::Pending,
        ComplaintStatus::Rejected,
        ComplaintStatus::Assigned,
        ComplaintStatus::InProgress,
        ComplaintStatus::RequestedChanges,
        ComplaintStatus::AwaitingReview,
        ComplaintStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::Rejected => "Rejected",
            ComplaintStatus::Assigned => "Assigned",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::RequestedChanges => "RequestedChanges",
            ComplaintStatus::AwaitingReview => "Completed - Awaiting Admin Review",
            ComplaintStatus::Completed => "Completed",
        }
    }

    /// Non-terminal statuses keep a cluster open for new duplicates.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Statuses in which the assigned worker still owes work.
    pub fn is_worker_pending(&self) -> bool {
        matches!(
            self,
            ComplaintStatus::Assigned
                | ComplaintStatus::InProgress
                | ComplaintStatus::RequestedChanges
        )
    }

    /// Statuses in which the worker has handed the task back.
    pub fn is_worker_finished(&self) -> bool {
        matches!(
            self,
            ComplaintStatus::AwaitingReview | ComplaintStatus::Completed
        )
    }
}

impl StateMachine for ComplaintStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ComplaintStatus::*;
        match self {
            Pending => vec![Assigned, Rejected],
            Assigned => vec![InProgress, AwaitingReview],
            InProgress => vec![AwaitingReview],
            RequestedChanges => vec![AwaitingReview],
            AwaitingReview => vec![Completed, RequestedChanges],
            Rejected | Completed => vec![],
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComplaintStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown status '{}'", s))
            })
    }
}
