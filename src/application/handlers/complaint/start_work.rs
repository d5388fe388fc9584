//! StartWorkHandler - assigned worker marks a task In Progress.

use std::sync::Arc;

use crate::domain::complaint::{ComplaintError, ComplaintStatus, ComplaintView, Transition};
use crate::domain::foundation::{CommandMetadata, ComplaintId};

use super::TransitionExecutor;

#[derive(Debug, Clone)]
pub struct StartWorkCommand {
    pub complaint_id: ComplaintId,
    pub expected_status: Option<ComplaintStatus>,
}

pub struct StartWorkHandler {
    executor: Arc<TransitionExecutor>,
}

impl StartWorkHandler {
    pub fn new(executor: Arc<TransitionExecutor>) -> Self {
        Self { executor }
    }

    pub async fn handle(
        &self,
        cmd: StartWorkCommand,
        metadata: CommandMetadata,
    ) -> Result<ComplaintView, ComplaintError> {
        let committed = self
            .executor
            .execute(
                cmd.complaint_id,
                Transition::BeginWork,
                cmd.expected_status,
                &metadata,
            )
            .await?;
        Ok(ComplaintView::of_representative(&committed.complaint)?)
    }
}
