//! Event infrastructure for complaint lifecycle notifications.
//!
//! - `EventId` identifies one emitted event.
//! - `EventMetadata` carries correlation and actor context.
//! - `EventEnvelope` is the transport wrapper handed to publishers.
//! - `DomainEvent` is implemented by every event, usually via `domain_event!`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

// ════════════════════════════════════════════════════════════════════════════════
// DomainEvent
// ════════════════════════════════════════════════════════════════════════════════

/// Contract shared by all domain events.
pub trait DomainEvent: Send + Sync {
    /// Routing key with version suffix, e.g. `complaint.submitted.v1`.
    fn event_type(&self) -> &'static str;

    fn schema_version(&self) -> u32;

    fn aggregate_id(&self) -> String;

    fn aggregate_type(&self) -> &'static str;

    fn occurred_at(&self) -> Timestamp;

    fn event_id(&self) -> EventId;
}

/// Extension for events that can be serialized into an envelope.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope::from_event(self)
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Implements `DomainEvent` for a struct by naming its fields.
///
/// ```ignore
/// domain_event!(
///     ComplaintSubmitted,
///     event_type = "complaint.submitted.v1",
///     schema_version = 1,
///     aggregate_id = complaint_id,
///     aggregate_type = "Complaint",
///     occurred_at = submitted_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        event_type = $event_type:expr,
        schema_version = $schema_version:expr,
        aggregate_id = $agg_id_field:ident,
        aggregate_type = $agg_type:expr,
        occurred_at = $occurred_field:ident,
        event_id = $event_id_field:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn schema_version(&self) -> u32 {
                $schema_version
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                $agg_type
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id_field.clone()
            }
        }
    };
}

pub use crate::domain_event;

// ════════════════════════════════════════════════════════════════════════════════
// Envelope
// ════════════════════════════════════════════════════════════════════════════════

/// Unique identifier for an emitted event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation and actor context attached to an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Transport wrapper for a serialized domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub schema_version: u32,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        aggregate_type: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        let event_type = event_type.into();
        let schema_version = Self::extract_version(&event_type);

        Self {
            event_id: EventId::new(),
            event_type,
            schema_version,
            aggregate_id: aggregate_id.into(),
            aggregate_type: aggregate_type.into(),
            occurred_at: Timestamp::now(),
            payload,
            metadata: EventMetadata::default(),
        }
    }

    /// Wraps a serializable event. A payload that fails to serialize becomes `null`.
    pub fn from_event<T>(event: &T) -> Self
    where
        T: DomainEvent + Serialize + ?Sized,
    {
        let event_type = event.event_type().to_string();
        let schema_version = Self::extract_version(&event_type);

        Self {
            event_id: event.event_id(),
            event_type,
            schema_version,
            aggregate_id: event.aggregate_id(),
            aggregate_type: event.aggregate_type().to_string(),
            occurred_at: event.occurred_at(),
            payload: serde_json::to_value(event).unwrap_or(JsonValue::Null),
            metadata: EventMetadata::default(),
        }
    }

    fn extract_version(event_type: &str) -> u32 {
        event_type
            .rsplit_once(".v")
            .and_then(|(_, version)| version.parse::<u32>().ok())
            .unwrap_or(1)
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(id.into());
        self
    }

    pub fn with_user_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.user_id = Some(id.into());
        self
    }

    /// Deserializes the payload into a concrete event type.
    pub fn payload_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct WorkStarted {
        event_id: EventId,
        complaint_id: String,
        started_at: Timestamp,
    }

    domain_event!(
        WorkStarted,
        event_type = "complaint.work_started.v2",
        schema_version = 2,
        aggregate_id = complaint_id,
        aggregate_type = "Complaint",
        occurred_at = started_at,
        event_id = event_id
    );

    fn sample() -> WorkStarted {
        WorkStarted {
            event_id: EventId::from_string("evt-1"),
            complaint_id: "c-42".to_string(),
            started_at: Timestamp::now(),
        }
    }

    #[test]
    fn envelope_copies_event_identity() {
        let event = sample();
        let envelope = event.to_envelope();

        assert_eq!(envelope.event_id.as_str(), "evt-1");
        assert_eq!(envelope.event_type, "complaint.work_started.v2");
        assert_eq!(envelope.schema_version, 2);
        assert_eq!(envelope.aggregate_id, "c-42");
        assert_eq!(envelope.aggregate_type, "Complaint");
        assert_eq!(envelope.occurred_at, event.started_at);
    }

    #[test]
    fn payload_round_trips_to_concrete_type() {
        let event = sample();
        let restored: WorkStarted = event.to_envelope().payload_as().unwrap();
        assert_eq!(restored, event);
    }

    #[test]
    fn version_defaults_to_one_without_suffix() {
        let envelope = EventEnvelope::new("complaint.ping", "c-1", "Complaint", json!({}));
        assert_eq!(envelope.schema_version, 1);
    }

    #[test]
    fn metadata_builders_set_fields() {
        let envelope = sample()
            .to_envelope()
            .with_correlation_id("corr-9")
            .with_user_id("admin-1");

        assert_eq!(envelope.metadata.correlation_id.as_deref(), Some("corr-9"));
        assert_eq!(envelope.metadata.user_id.as_deref(), Some("admin-1"));
    }

    #[test]
    fn empty_metadata_is_omitted_from_json() {
        let json = serde_json::to_string(&EventMetadata::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
