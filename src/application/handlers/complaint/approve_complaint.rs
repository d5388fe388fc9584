//! ApproveComplaintHandler - admin approves a representative and assigns a worker.

use std::sync::Arc;

use crate::domain::complaint::{ComplaintError, ComplaintStatus, ComplaintView, Transition};
use crate::domain::foundation::{CommandMetadata, ComplaintId, Operation, UserId};
use crate::ports::UserDirectory;

use super::TransitionExecutor;

#[derive(Debug, Clone)]
pub struct ApproveComplaintCommand {
    pub complaint_id: ComplaintId,
    pub worker_id: UserId,
    pub expected_status: Option<ComplaintStatus>,
}

pub struct ApproveComplaintHandler {
    executor: Arc<TransitionExecutor>,
    users: Arc<dyn UserDirectory>,
}

impl ApproveComplaintHandler {
    pub fn new(executor: Arc<TransitionExecutor>, users: Arc<dyn UserDirectory>) -> Self {
        Self { executor, users }
    }

    pub async fn handle(
        &self,
        cmd: ApproveComplaintCommand,
        metadata: CommandMetadata,
    ) -> Result<ComplaintView, ComplaintError> {
        metadata.require(Operation::ApproveComplaint)?;

        let assignable = self
            .users
            .find_by_id(&cmd.worker_id)
            .await?
            .is_some_and(|u| u.is_assignable_worker());
        if !assignable {
            return Err(ComplaintError::validation(
                "worker_id",
                format!("{} is not an active worker", cmd.worker_id),
            ));
        }

        let committed = self
            .executor
            .execute(
                cmd.complaint_id,
                Transition::Approve {
                    worker_id: cmd.worker_id,
                },
                cmd.expected_status,
                &metadata,
            )
            .await?;
        Ok(ComplaintView::of_representative(&committed.complaint)?)
    }
}
