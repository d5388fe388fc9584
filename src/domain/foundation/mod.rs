//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the grievance domain.

mod auth;
mod authorization;
mod command;
mod errors;
mod events;
mod ids;
mod role;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use authorization::{check_capability, permits, AuthorizationResult, Operation};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{ComplaintId, NotificationId, TransitionId, UserId};
pub use role::Role;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
