//! CreateComplaintHandler - files a complaint and places it in a cluster.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::clustering::{resolve_cluster, ClusterDecision};
use crate::domain::complaint::{
    Category, Complaint, ComplaintDraft, ComplaintError, ComplaintSubmitted, ComplaintType,
    ComplaintView,
};
use crate::domain::foundation::{CommandMetadata, Operation, SerializableDomainEvent, Timestamp};
use crate::ports::{ComplaintReader, ComplaintRepository, EventPublisher, PriorityPolicy};

/// Attempts made to settle a cluster under contention.
pub const DEFAULT_CLUSTER_ATTEMPTS: u32 = 8;

/// Command to file a complaint. The author is the caller.
#[derive(Debug, Clone)]
pub struct CreateComplaintCommand {
    pub complaint_type: ComplaintType,
    pub floor: String,
    pub room: Option<String>,
    pub category: Category,
    pub subcategory: String,
    pub description: Option<String>,
    pub media_url: Option<String>,
}

pub struct CreateComplaintHandler {
    repository: Arc<dyn ComplaintRepository>,
    reader: Arc<dyn ComplaintReader>,
    priority_policy: Arc<dyn PriorityPolicy>,
    event_publisher: Arc<dyn EventPublisher>,
    max_attempts: u32,
}

impl CreateComplaintHandler {
    pub fn new(
        repository: Arc<dyn ComplaintRepository>,
        reader: Arc<dyn ComplaintReader>,
        priority_policy: Arc<dyn PriorityPolicy>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            reader,
            priority_policy,
            event_publisher,
            max_attempts: DEFAULT_CLUSTER_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Returns the caller's own record, which is a duplicate when the
    /// complaint joined an existing cluster.
    pub async fn handle(
        &self,
        cmd: CreateComplaintCommand,
        metadata: CommandMetadata,
    ) -> Result<ComplaintView, ComplaintError> {
        metadata.require(Operation::SubmitComplaint)?;

        let draft = ComplaintDraft::new(
            metadata.user_id.clone(),
            cmd.complaint_type,
            &cmd.floor,
            cmd.room,
            cmd.category,
            &cmd.subcategory,
            cmd.description,
            cmd.media_url,
        )?;
        let priority = self.priority_policy.assign(&draft);
        let key = draft.cluster_key();

        for attempt in 1..=self.max_attempts {
            let candidates = match &key {
                Some(key) => self.reader.find_active_representatives(key).await?,
                None => Vec::new(),
            };

            let (complaint, view, count) = match resolve_cluster(key.as_ref(), &candidates) {
                ClusterDecision::StartNew => {
                    let rep = draft.clone().into_representative(priority, Timestamp::now());
                    match self.repository.insert_representative(&rep).await {
                        Ok(()) => {
                            let view = ComplaintView::of_representative(&rep)?;
                            (rep, view, 1)
                        }
                        Err(err) if err.is_conflict() => {
                            debug!(attempt, "Cluster opened concurrently, retrying");
                            continue;
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
                ClusterDecision::Join(rep_id) => {
                    let dup = draft
                        .clone()
                        .into_duplicate(rep_id, priority, Timestamp::now());
                    match self.repository.attach_duplicate(&dup).await {
                        Ok(count) => {
                            let rep = self
                                .repository
                                .find_by_id(&rep_id)
                                .await?
                                .ok_or(ComplaintError::NotFound(rep_id))?;
                            let view = ComplaintView::resolve(&dup, Some(&rep))?;
                            (dup, view, count)
                        }
                        Err(err) if err.is_conflict() => {
                            debug!(
                                attempt,
                                representative = %rep_id,
                                "Cluster closed concurrently, retrying"
                            );
                            continue;
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
            };

            info!(
                complaint_id = %complaint.id(),
                cluster_id = %complaint.cluster_id(),
                joined_existing = !complaint.is_representative(),
                count,
                "Complaint filed"
            );
            self.publish(&complaint, count, &metadata).await;
            return Ok(view);
        }

        warn!(
            attempts = self.max_attempts,
            cluster = ?key.as_ref().map(|k| k.to_string()),
            "Could not settle cluster"
        );
        Err(ComplaintError::invalid_transition(
            "Cluster is under heavy contention; try again",
        ))
    }

    async fn publish(&self, complaint: &Complaint, count: u32, metadata: &CommandMetadata) {
        let envelope = ComplaintSubmitted::new(complaint, count)
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());

        if let Err(err) = self.event_publisher.publish(envelope).await {
            warn!(
                complaint_id = %complaint.id(),
                error = %err,
                "Failed to publish ComplaintSubmitted"
            );
        }
    }
}
