//! GetComplaintHistoryHandler - transition audit trail of a cluster.

use std::sync::Arc;

use crate::domain::complaint::{ComplaintError, TransitionRecord};
use crate::domain::foundation::{CommandMetadata, ComplaintId, Operation, Role};
use crate::ports::{ComplaintReader, ComplaintRepository};

pub struct GetComplaintHistoryHandler {
    repository: Arc<dyn ComplaintRepository>,
    reader: Arc<dyn ComplaintReader>,
}

impl GetComplaintHistoryHandler {
    pub fn new(
        repository: Arc<dyn ComplaintRepository>,
        reader: Arc<dyn ComplaintReader>,
    ) -> Self {
        Self { repository, reader }
    }

    /// Oldest first. A duplicate id yields its representative's trail.
    ///
    /// Visible to admins, to every reporter in the cluster, and to the
    /// assigned worker.
    pub async fn handle(
        &self,
        complaint_id: ComplaintId,
        metadata: CommandMetadata,
    ) -> Result<Vec<TransitionRecord>, ComplaintError> {
        metadata.require(Operation::ViewHistory)?;

        let complaint = self
            .repository
            .find_by_id(&complaint_id)
            .await?
            .ok_or(ComplaintError::NotFound(complaint_id))?;
        let rep_id = *complaint.cluster_id();
        let rep = if complaint.is_representative() {
            complaint
        } else {
            self.repository
                .find_by_id(&rep_id)
                .await?
                .ok_or(ComplaintError::NotFound(rep_id))?
        };

        let visible = match metadata.role {
            Role::Admin => true,
            Role::Worker => rep.is_assigned_to(&metadata.user_id),
            Role::Resident => {
                rep.author_id() == &metadata.user_id
                    || self
                        .reader
                        .list_duplicates(&rep_id)
                        .await?
                        .iter()
                        .any(|d| d.author_id() == &metadata.user_id)
            }
        };
        if !visible {
            return Err(ComplaintError::forbidden(format!(
                "{} may not view the history of complaint {}",
                metadata.user_id, complaint_id
            )));
        }

        Ok(self.reader.transition_history(&rep_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::complaint::test_support::{
        admin, resident, uid, worker, World,
    };
    use crate::application::handlers::complaint::{
        ApproveComplaintCommand, ApproveComplaintHandler,
    };
    use crate::domain::complaint::TransitionAction;

    async fn approved_cluster(world: &World) -> (ComplaintId, ComplaintId) {
        let rep = world.pending("resident-1").await;
        let dup = world.duplicate_of(rep, "resident-2").await;
        ApproveComplaintHandler::new(world.executor.clone(), world.users.clone())
            .handle(
                ApproveComplaintCommand {
                    complaint_id: rep,
                    worker_id: uid("worker-1"),
                    expected_status: None,
                },
                admin(),
            )
            .await
            .unwrap();
        (rep, dup)
    }

    fn handler(world: &World) -> GetComplaintHistoryHandler {
        GetComplaintHistoryHandler::new(world.store.clone(), world.store.clone())
    }

    #[tokio::test]
    async fn duplicate_reporter_sees_representative_trail() {
        let world = World::new();
        let (_, dup) = approved_cluster(&world).await;

        let history = handler(&world).handle(dup, resident("resident-2")).await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, TransitionAction::Approve);
    }

    #[tokio::test]
    async fn assignee_and_admin_can_view() {
        let world = World::new();
        let (rep, _) = approved_cluster(&world).await;

        assert!(handler(&world).handle(rep, worker("worker-1")).await.is_ok());
        assert!(handler(&world).handle(rep, admin()).await.is_ok());
    }

    #[tokio::test]
    async fn outsiders_are_forbidden() {
        let world = World::new();
        let (rep, _) = approved_cluster(&world).await;

        let err = handler(&world)
            .handle(rep, resident("stranger"))
            .await
            .unwrap_err();
        assert!(matches!(err, ComplaintError::Forbidden(_)));

        let err = handler(&world).handle(rep, worker("worker-2")).await.unwrap_err();
        assert!(matches!(err, ComplaintError::Forbidden(_)));
    }
}
