//! UpdateTaskStatusHandler - assigned worker hands a task back for review.

use std::sync::Arc;

use crate::domain::complaint::{
    ComplaintError, ComplaintStatus, ComplaintView, Transition, WorkOutcome,
};
use crate::domain::foundation::{CommandMetadata, ComplaintId};

use super::TransitionExecutor;

#[derive(Debug, Clone)]
pub struct UpdateTaskStatusCommand {
    pub complaint_id: ComplaintId,
    pub outcome: WorkOutcome,
    pub resolution: String,
    pub proof_media: Option<String>,
    pub expected_status: Option<ComplaintStatus>,
}

pub struct UpdateTaskStatusHandler {
    executor: Arc<TransitionExecutor>,
}

impl UpdateTaskStatusHandler {
    pub fn new(executor: Arc<TransitionExecutor>) -> Self {
        Self { executor }
    }

    /// Moves the task to awaiting review with the worker's outcome attached.
    pub async fn handle(
        &self,
        cmd: UpdateTaskStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<ComplaintView, ComplaintError> {
        let committed = self
            .executor
            .execute(
                cmd.complaint_id,
                Transition::SubmitWork {
                    outcome: cmd.outcome,
                    resolution: cmd.resolution,
                    proof_media: cmd.proof_media,
                },
                cmd.expected_status,
                &metadata,
            )
            .await?;
        Ok(ComplaintView::of_representative(&committed.complaint)?)
    }
}
