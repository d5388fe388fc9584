//! Shared write path for lifecycle transitions.
//!
//! Reads the representative, applies the transition in memory, then
//! compare-and-sets it against the version read. A lost race re-reads and
//! re-validates, so a retry only commits if the precondition still holds.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::complaint::{
    Complaint, ComplaintError, ComplaintStatus, ComplaintTransitioned, Transition,
    TransitionRecord,
};
use crate::domain::foundation::{
    CommandMetadata, ComplaintId, SerializableDomainEvent, Timestamp,
};
use crate::ports::{ComplaintRepository, EventPublisher};

/// Attempts made before a persistently contended transition gives up.
pub const DEFAULT_TRANSITION_ATTEMPTS: u32 = 5;

/// A transition that reached the store.
#[derive(Debug, Clone)]
pub struct CommittedTransition {
    pub complaint: Complaint,
    pub record: TransitionRecord,
}

/// Runs transitions with optimistic concurrency and bounded retry.
pub struct TransitionExecutor {
    repository: Arc<dyn ComplaintRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    max_attempts: u32,
}

impl TransitionExecutor {
    pub fn new(
        repository: Arc<dyn ComplaintRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            max_attempts: DEFAULT_TRANSITION_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn repository(&self) -> &Arc<dyn ComplaintRepository> {
        &self.repository
    }

    pub async fn execute(
        &self,
        complaint_id: ComplaintId,
        transition: Transition,
        expected: Option<ComplaintStatus>,
        metadata: &CommandMetadata,
    ) -> Result<CommittedTransition, ComplaintError> {
        metadata.require(transition.operation())?;

        for attempt in 1..=self.max_attempts {
            let mut complaint = self
                .repository
                .find_by_id(&complaint_id)
                .await?
                .ok_or(ComplaintError::NotFound(complaint_id))?;
            let read_version = complaint.version().unwrap_or_default();

            let record = complaint.apply(
                transition.clone(),
                &metadata.user_id,
                metadata.role,
                expected,
                Timestamp::now(),
            )?;

            match self
                .repository
                .apply_transition(&complaint, read_version, &record)
                .await
            {
                Ok(()) => {
                    info!(
                        complaint_id = %complaint_id,
                        action = %record.action,
                        from = %record.from_status,
                        to = %record.to_status,
                        actor = %metadata.user_id,
                        "Complaint transitioned"
                    );
                    self.publish(&complaint, &record, metadata).await;
                    return Ok(CommittedTransition { complaint, record });
                }
                Err(err) if err.is_conflict() => {
                    debug!(
                        complaint_id = %complaint_id,
                        attempt,
                        "Lost transition race, re-reading"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        warn!(
            complaint_id = %complaint_id,
            attempts = self.max_attempts,
            action = %transition.action(),
            "Transition kept losing races, giving up"
        );
        Err(ComplaintError::invalid_transition(format!(
            "Complaint {} is being modified concurrently; try again",
            complaint_id
        )))
    }

    // The transition is already committed; a failed delivery must not
    // turn the request into an error.
    async fn publish(
        &self,
        complaint: &Complaint,
        record: &TransitionRecord,
        metadata: &CommandMetadata,
    ) {
        let envelope = ComplaintTransitioned::new(complaint, record)
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());

        if let Err(err) = self.event_publisher.publish(envelope).await {
            warn!(
                complaint_id = %record.complaint_id,
                error = %err,
                "Failed to publish ComplaintTransitioned"
            );
        }
    }
}
