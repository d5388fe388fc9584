//! In-process event bus.
//!
//! Delivers each published envelope to the handlers subscribed to its type,
//! in subscription order, on the publishing task. Published envelopes are
//! retained so tests can assert on them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

type HandlerMap = HashMap<String, Vec<Arc<dyn EventHandler>>>;

pub struct InMemoryEventBus {
    handlers: RwLock<HandlerMap>,
    published: RwLock<Vec<EventEnvelope>>,
    retain: bool,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(Vec::new()),
            retain: true,
        }
    }

    /// A bus that dispatches without keeping a copy of each envelope.
    pub fn transient() -> Self {
        Self {
            retain: false,
            ..Self::new()
        }
    }

    // Poisoning only means another thread panicked mid-push; the data is
    // still a valid Vec/HashMap, so recover it.
    fn handlers_read(&self) -> RwLockReadGuard<'_, HandlerMap> {
        self.handlers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn handlers_write(&self) -> RwLockWriteGuard<'_, HandlerMap> {
        self.handlers.write().unwrap_or_else(|e| e.into_inner())
    }

    // === Inspection ===

    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.published.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers_read().get(event_type).map_or(0, Vec::len)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.retain {
            self.published
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .push(event.clone());
        }

        // Clone handlers so no lock is held across await points.
        let type_handlers: Vec<Arc<dyn EventHandler>> = self
            .handlers_read()
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default();

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                tracing::warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    error = %e,
                    "event handler failed"
                );
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }
        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        tracing::debug!(handler = handler.name(), event_type, "subscribing handler");
        self.handlers_write()
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }
}
