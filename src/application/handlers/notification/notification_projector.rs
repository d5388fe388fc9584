//! NotificationProjector - turns complaint events into user notifications.

use async_trait::async_trait;
use std::sync::Arc;

use tracing::debug;

use crate::domain::complaint::{
    Complaint, ComplaintStatus, ComplaintSubmitted, ComplaintTransitioned, TransitionAction,
};
use crate::domain::foundation::{
    ComplaintId, DomainError, ErrorCode, EventEnvelope, Role, Timestamp, UserId,
};
use crate::domain::notification::{Notice, Notification};
use crate::ports::{
    ComplaintReader, ComplaintRepository, EventHandler, NotificationRepository, UserDirectory,
};

pub const SUBMITTED_EVENT: &str = "complaint.submitted.v1";
pub const TRANSITIONED_EVENT: &str = "complaint.transitioned.v1";

/// Event types the projector must be subscribed to.
pub const PROJECTED_EVENTS: [&str; 2] = [SUBMITTED_EVENT, TRANSITIONED_EVENT];

pub struct NotificationProjector {
    complaints: Arc<dyn ComplaintRepository>,
    reader: Arc<dyn ComplaintReader>,
    users: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationProjector {
    pub fn new(
        complaints: Arc<dyn ComplaintRepository>,
        reader: Arc<dyn ComplaintReader>,
        users: Arc<dyn UserDirectory>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            complaints,
            reader,
            users,
            notifications,
        }
    }

    async fn on_submitted(
        &self,
        event: ComplaintSubmitted,
    ) -> Result<Vec<Notification>, DomainError> {
        let notice = Notice::NewComplaint {
            complaint_type: event.complaint_type,
        };
        let now = Timestamp::now();
        Ok(self
            .active_admins()
            .await?
            .into_iter()
            .map(|admin| notice.to(admin, event.complaint_id, now))
            .collect())
    }

    async fn on_transitioned(
        &self,
        event: ComplaintTransitioned,
    ) -> Result<Vec<Notification>, DomainError> {
        let now = Timestamp::now();
        let complaint_id = event.complaint_id;
        let worker = event.assigned_worker_id.clone();
        let mut out = Vec::new();

        match event.action {
            TransitionAction::Approve => {
                out.extend(self.to_reporters(complaint_id, &Notice::Approved, now).await?);
                if let Some(worker) = worker {
                    let rep = self.representative(complaint_id).await?;
                    let notice = Notice::TaskAssigned {
                        category: rep.category(),
                    };
                    out.push(notice.to(worker, complaint_id, now));
                }
            }
            TransitionAction::Reject => {
                let notice = Notice::Rejected {
                    reason: event.rationale.clone().unwrap_or_default(),
                };
                out.extend(self.to_reporters(complaint_id, &notice, now).await?);
            }
            TransitionAction::BeginWork | TransitionAction::SubmitWork => {
                let label = match event.outcome {
                    Some(outcome) => outcome.as_str().to_string(),
                    None => ComplaintStatus::InProgress.as_str().to_string(),
                };
                let admin_notice = Notice::WorkerUpdate {
                    label: label.clone(),
                };
                out.extend(
                    self.active_admins()
                        .await?
                        .into_iter()
                        .map(|admin| admin_notice.to(admin, complaint_id, now)),
                );
                out.extend(
                    self.to_reporters(complaint_id, &Notice::StatusUpdate { label }, now)
                        .await?,
                );
            }
            TransitionAction::AcceptReview => {
                out.extend(self.to_reporters(complaint_id, &Notice::Completed, now).await?);
            }
            TransitionAction::RequestChanges => {
                if let Some(worker) = worker {
                    out.push(Notice::ChangesRequested.to(worker, complaint_id, now));
                }
            }
        }
        Ok(out)
    }

    async fn active_admins(&self) -> Result<Vec<UserId>, DomainError> {
        Ok(self
            .users
            .list_by_role(Role::Admin)
            .await?
            .into_iter()
            .filter(|u| u.is_active)
            .map(|u| u.id)
            .collect())
    }

    async fn representative(&self, id: ComplaintId) -> Result<Complaint, DomainError> {
        self.complaints.find_by_id(&id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::ComplaintNotFound, "Complaint not found")
                .with_detail("complaint_id", id.to_string())
        })
    }

    /// One notification per reporter in the cluster, each pointing at the
    /// reporter's own complaint.
    async fn to_reporters(
        &self,
        rep_id: ComplaintId,
        notice: &Notice,
        now: Timestamp,
    ) -> Result<Vec<Notification>, DomainError> {
        let rep = self.representative(rep_id).await?;
        let duplicates = self.reader.list_duplicates(&rep_id).await?;

        let mut seen: Vec<UserId> = Vec::new();
        let mut out = Vec::new();
        for complaint in std::iter::once(&rep).chain(duplicates.iter()) {
            let author = complaint.author_id();
            if seen.contains(author) {
                continue;
            }
            seen.push(author.clone());
            out.push(notice.to(author.clone(), *complaint.id(), now));
        }
        Ok(out)
    }
}

#[async_trait]
impl EventHandler for NotificationProjector {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let notifications = match event.event_type.as_str() {
            SUBMITTED_EVENT => self.on_submitted(decode(&event)?).await?,
            TRANSITIONED_EVENT => self.on_transitioned(decode(&event)?).await?,
            _ => return Ok(()),
        };

        debug!(
            event_id = %event.event_id,
            count = notifications.len(),
            "Projecting notifications"
        );
        for notification in &notifications {
            self.notifications.save(notification).await?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "NotificationProjector"
    }
}

fn decode<T: for<'de> serde::Deserialize<'de>>(event: &EventEnvelope) -> Result<T, DomainError> {
    event.payload_as().map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Malformed {} payload: {}", event.event_type, e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryNotificationStore;
    use crate::application::handlers::complaint::test_support::{admin, uid, worker, World};
    use crate::application::handlers::complaint::{
        ApproveComplaintCommand, ApproveComplaintHandler, RejectComplaintCommand,
        RejectComplaintHandler, ReviewAction, ReviewComplaintCommand, ReviewComplaintHandler,
        UpdateTaskStatusCommand, UpdateTaskStatusHandler,
    };
    use crate::domain::complaint::WorkOutcome;
    use crate::ports::EventSubscriber;

    struct Projected {
        world: World,
        notes: Arc<InMemoryNotificationStore>,
    }

    impl Projected {
        fn new() -> Self {
            let world = World::new();
            let notes = Arc::new(InMemoryNotificationStore::new());
            let projector = Arc::new(NotificationProjector::new(
                world.store.clone(),
                world.store.clone(),
                world.users.clone(),
                notes.clone(),
            ));
            world.bus.subscribe_all(&PROJECTED_EVENTS, projector);
            Self { world, notes }
        }

        async fn inbox(&self, user: &str) -> Vec<Notification> {
            self.notes.list_for_recipient(&uid(user), 100).await.unwrap()
        }

        async fn approve(&self, id: ComplaintId) {
            ApproveComplaintHandler::new(self.world.executor.clone(), self.world.users.clone())
                .handle(
                    ApproveComplaintCommand {
                        complaint_id: id,
                        worker_id: uid("worker-1"),
                        expected_status: None,
                    },
                    admin(),
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn approval_notifies_every_reporter_and_the_worker() {
        let p = Projected::new();
        let rep = p.world.pending("resident-1").await;
        let dup = p.world.duplicate_of(rep, "resident-2").await;

        p.approve(rep).await;

        let r1 = p.inbox("resident-1").await;
        let r2 = p.inbox("resident-2").await;
        let w = p.inbox("worker-1").await;
        assert_eq!(r1.len(), 1);
        assert_eq!(r1[0].title, "Complaint Approved");
        assert_eq!(r1[0].complaint_id, rep);
        assert_eq!(r2[0].complaint_id, dup);
        assert_eq!(w[0].title, "New Task Assigned");
        assert_eq!(w[0].message, "You have been assigned a new task: Plumbing");
    }

    #[tokio::test]
    async fn rejection_reason_reaches_reporters() {
        let p = Projected::new();
        let rep = p.world.pending("resident-1").await;

        RejectComplaintHandler::new(p.world.executor.clone())
            .handle(
                RejectComplaintCommand {
                    complaint_id: rep,
                    reason: "Outside our scope".into(),
                    expected_status: None,
                },
                admin(),
            )
            .await
            .unwrap();

        let inbox = p.inbox("resident-1").await;
        assert_eq!(inbox[0].title, "Complaint Rejected");
        assert!(inbox[0].message.contains("Outside our scope"));
    }

    #[tokio::test]
    async fn work_submission_notifies_admins_and_changes_reach_worker() {
        let p = Projected::new();
        let rep = p.world.pending("resident-1").await;
        p.approve(rep).await;

        UpdateTaskStatusHandler::new(p.world.executor.clone())
            .handle(
                UpdateTaskStatusCommand {
                    complaint_id: rep,
                    outcome: WorkOutcome::Resolved,
                    resolution: "Replaced washer".into(),
                    proof_media: None,
                    expected_status: None,
                },
                worker("worker-1"),
            )
            .await
            .unwrap();

        let admin_inbox = p.inbox("admin-1").await;
        assert_eq!(admin_inbox[0].message, "Worker has marked task as Resolved");

        ReviewComplaintHandler::new(p.world.executor.clone())
            .handle(
                ReviewComplaintCommand {
                    complaint_id: rep,
                    action: ReviewAction::RequestedChanges,
                    expected_status: None,
                },
                admin(),
            )
            .await
            .unwrap();

        let worker_inbox = p.inbox("worker-1").await;
        assert!(worker_inbox.iter().any(|n| n.title == "Changes Requested"));
    }

    #[tokio::test]
    async fn unrelated_events_are_ignored() {
        let p = Projected::new();
        let projector = NotificationProjector::new(
            p.world.store.clone(),
            p.world.store.clone(),
            p.world.users.clone(),
            p.notes.clone(),
        );
        let envelope =
            EventEnvelope::new("complaint.archived.v1", "x", "Complaint", serde_json::json!({}));

        projector.handle(envelope).await.unwrap();

        assert!(p.inbox("admin-1").await.is_empty());
    }
}
