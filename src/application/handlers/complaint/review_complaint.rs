//! ReviewComplaintHandler - admin verdict on submitted work.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::complaint::{ComplaintError, ComplaintStatus, ComplaintView, Transition};
use crate::domain::foundation::{CommandMetadata, ComplaintId, ValidationError};

use super::TransitionExecutor;

/// Admin verdict, named after the status it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Completed,
    RequestedChanges,
}

impl ReviewAction {
    fn transition(self) -> Transition {
        match self {
            ReviewAction::Completed => Transition::AcceptReview,
            ReviewAction::RequestedChanges => Transition::RequestChanges,
        }
    }
}

impl FromStr for ReviewAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Completed" => Ok(ReviewAction::Completed),
            "RequestedChanges" => Ok(ReviewAction::RequestedChanges),
            other => Err(ValidationError::invalid_format(
                "action",
                format!("expected 'Completed' or 'RequestedChanges', got '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewComplaintCommand {
    pub complaint_id: ComplaintId,
    pub action: ReviewAction,
    pub expected_status: Option<ComplaintStatus>,
}

pub struct ReviewComplaintHandler {
    executor: Arc<TransitionExecutor>,
}

impl ReviewComplaintHandler {
    pub fn new(executor: Arc<TransitionExecutor>) -> Self {
        Self { executor }
    }

    pub async fn handle(
        &self,
        cmd: ReviewComplaintCommand,
        metadata: CommandMetadata,
    ) -> Result<ComplaintView, ComplaintError> {
        let committed = self
            .executor
            .execute(
                cmd.complaint_id,
                cmd.action.transition(),
                cmd.expected_status,
                &metadata,
            )
            .await?;
        Ok(ComplaintView::of_representative(&committed.complaint)?)
    }
}
