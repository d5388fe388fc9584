//! EventPublisher port - publishing complaint events.
//!
//! Callers publish after the store has committed; delivery failures are
//! reported but never roll back the committed state.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events to interested handlers.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publishes events in order, stopping at the first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
