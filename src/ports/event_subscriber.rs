//! EventSubscriber port - registering handlers for complaint events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler invoked for each matching event.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Name used in logs.
    fn name(&self) -> &'static str;
}

/// Port for registering handlers by event type.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        for event_type in event_types {
            self.subscribe(event_type, handler.clone());
        }
    }
}

/// Publisher and subscriber in one.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
