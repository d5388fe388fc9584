//! ListWorkerTasksHandler - representatives assigned to the calling worker.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::complaint::{ComplaintError, ComplaintView};
use crate::domain::foundation::{CommandMetadata, Operation, ValidationError};
use crate::ports::{ComplaintReader, RepresentativeFilter, UserDirectory};

use super::listing::{attach_people, ComplaintListing, People};

/// Subset of a worker's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskBucket {
    #[default]
    All,
    /// Assigned, In Progress or RequestedChanges.
    Pending,
    /// Awaiting review or Completed.
    Finished,
}

impl FromStr for TaskBucket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(TaskBucket::All),
            "pending" => Ok(TaskBucket::Pending),
            "finished" => Ok(TaskBucket::Finished),
            other => Err(ValidationError::invalid_format(
                "bucket",
                format!("unknown bucket '{}'", other),
            )),
        }
    }
}

pub struct ListWorkerTasksHandler {
    reader: Arc<dyn ComplaintReader>,
    users: Arc<dyn UserDirectory>,
}

impl ListWorkerTasksHandler {
    pub fn new(reader: Arc<dyn ComplaintReader>, users: Arc<dyn UserDirectory>) -> Self {
        Self { reader, users }
    }

    /// Rows name the reporter so the worker knows whom to contact.
    pub async fn handle(
        &self,
        bucket: TaskBucket,
        metadata: CommandMetadata,
    ) -> Result<Vec<ComplaintListing>, ComplaintError> {
        metadata.require(Operation::ListAssignedTasks)?;
        let tasks = self
            .reader
            .list_representatives(&RepresentativeFilter::assigned_to(metadata.user_id.clone()))
            .await?;

        let views = tasks
            .iter()
            .filter(|c| match (bucket, c.status()) {
                (TaskBucket::All, _) => true,
                (TaskBucket::Pending, Some(s)) => s.is_worker_pending(),
                (TaskBucket::Finished, Some(s)) => s.is_worker_finished(),
                (_, None) => false,
            })
            .map(|c| ComplaintView::of_representative(c).map_err(ComplaintError::from))
            .collect::<Result<Vec<_>, _>>()?;
        attach_people(self.users.as_ref(), views, People::Reporter).await
    }
}
