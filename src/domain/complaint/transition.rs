//! Lifecycle transitions and their audit records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    ComplaintId, Operation, Role, Timestamp, TransitionId, UserId,
};

use super::{ComplaintStatus, WorkOutcome};

/// A requested change to a representative's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Admin approves and assigns a worker.
    Approve { worker_id: UserId },
    /// Admin rejects with a reason shown to the reporters.
    Reject { reason: String },
    /// Assigned worker starts on site.
    BeginWork,
    /// Assigned worker hands the task back for review.
    SubmitWork {
        outcome: WorkOutcome,
        resolution: String,
        proof_media: Option<String>,
    },
    /// Admin accepts the submitted work.
    AcceptReview,
    /// Admin sends the work back to the worker.
    RequestChanges,
}

impl Transition {
    pub fn action(&self) -> TransitionAction {
        match self {
            Transition::Approve { .. } => TransitionAction::Approve,
            Transition::Reject { .. } => TransitionAction::Reject,
            Transition::BeginWork => TransitionAction::BeginWork,
            Transition::SubmitWork { .. } => TransitionAction::SubmitWork,
            Transition::AcceptReview => TransitionAction::AcceptReview,
            Transition::RequestChanges => TransitionAction::RequestChanges,
        }
    }

    /// Capability table entry guarding this transition.
    pub fn operation(&self) -> Operation {
        match self {
            Transition::Approve { .. } => Operation::ApproveComplaint,
            Transition::Reject { .. } => Operation::RejectComplaint,
            Transition::BeginWork => Operation::StartWork,
            Transition::SubmitWork { .. } => Operation::SubmitWork,
            Transition::AcceptReview | Transition::RequestChanges => Operation::ReviewComplaint,
        }
    }

    /// True for transitions only the assigned worker may perform.
    pub fn requires_assignment(&self) -> bool {
        matches!(self, Transition::BeginWork | Transition::SubmitWork { .. })
    }

    pub fn allowed_sources(&self) -> &'static [ComplaintStatus] {
        use ComplaintStatus::*;
        match self {
            Transition::Approve { .. } | Transition::Reject { .. } => &[Pending],
            Transition::BeginWork => &[Assigned],
            Transition::SubmitWork { .. } => &[InProgress, Assigned, RequestedChanges],
            Transition::AcceptReview | Transition::RequestChanges => &[AwaitingReview],
        }
    }

    pub fn target(&self) -> ComplaintStatus {
        match self {
            Transition::Approve { .. } => ComplaintStatus::Assigned,
            Transition::Reject { .. } => ComplaintStatus::Rejected,
            Transition::BeginWork => ComplaintStatus::InProgress,
            Transition::SubmitWork { .. } => ComplaintStatus::AwaitingReview,
            Transition::AcceptReview => ComplaintStatus::Completed,
            Transition::RequestChanges => ComplaintStatus::RequestedChanges,
        }
    }
}

/// Stable name of a transition, stored in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    Approve,
    Reject,
    BeginWork,
    SubmitWork,
    AcceptReview,
    RequestChanges,
}

impl TransitionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionAction::Approve => "approve",
            TransitionAction::Reject => "reject",
            TransitionAction::BeginWork => "begin_work",
            TransitionAction::SubmitWork => "submit_work",
            TransitionAction::AcceptReview => "accept_review",
            TransitionAction::RequestChanges => "request_changes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        use TransitionAction::*;
        [Approve, Reject, BeginWork, SubmitWork, AcceptReview, RequestChanges]
            .into_iter()
            .find(|a| a.as_str() == s)
    }
}

impl fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit entry written atomically with every committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub id: TransitionId,
    pub complaint_id: ComplaintId,
    pub action: TransitionAction,
    pub from_status: ComplaintStatus,
    pub to_status: ComplaintStatus,
    pub actor_id: UserId,
    pub actor_role: Role,
    /// Rejection reason or resolution notes.
    pub rationale: Option<String>,
    pub outcome: Option<WorkOutcome>,
    pub proof_media: Option<String>,
    pub occurred_at: Timestamp,
}
