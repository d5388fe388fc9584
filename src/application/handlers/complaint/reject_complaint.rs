//! RejectComplaintHandler - admin closes a pending representative with a reason.

use std::sync::Arc;

use crate::domain::complaint::{ComplaintError, ComplaintStatus, ComplaintView, Transition};
use crate::domain::foundation::{CommandMetadata, ComplaintId};

use super::TransitionExecutor;

#[derive(Debug, Clone)]
pub struct RejectComplaintCommand {
    pub complaint_id: ComplaintId,
    pub reason: String,
    pub expected_status: Option<ComplaintStatus>,
}

pub struct RejectComplaintHandler {
    executor: Arc<TransitionExecutor>,
}

impl RejectComplaintHandler {
    pub fn new(executor: Arc<TransitionExecutor>) -> Self {
        Self { executor }
    }

    pub async fn handle(
        &self,
        cmd: RejectComplaintCommand,
        metadata: CommandMetadata,
    ) -> Result<ComplaintView, ComplaintError> {
        let committed = self
            .executor
            .execute(
                cmd.complaint_id,
                Transition::Reject { reason: cmd.reason },
                cmd.expected_status,
                &metadata,
            )
            .await?;
        Ok(ComplaintView::of_representative(&committed.complaint)?)
    }
}
