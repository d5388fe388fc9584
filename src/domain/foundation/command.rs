//! Command context for application handlers.
//!
//! Handlers take a single `CommandMetadata` instead of separate actor,
//! role and correlation parameters, and propagate it to emitted events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{check_capability, AuthenticatedUser, DomainError, Operation, Role, UserId};

/// Actor and tracing context for one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command.
    pub user_id: UserId,

    /// Role asserted for the user; drives the capability table.
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Where the command came from (e.g. "api", "test").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            correlation_id: None,
            source: None,
        }
    }

    /// Builds metadata for an authenticated caller.
    pub fn for_user(user: &AuthenticatedUser) -> Self {
        Self::new(user.id.clone(), user.role)
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Consults the capability table for this actor.
    pub fn require(&self, op: Operation) -> Result<(), DomainError> {
        check_capability(&self.user_id, self.role, op)
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Test fixture for a given actor.
    pub fn test_fixture(user_id: &str, role: Role) -> Self {
        Self::new(UserId::new(user_id).unwrap(), role)
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn for_user_copies_identity_and_role() {
        let user = AuthenticatedUser::new(UserId::new("w-1").unwrap(), Role::Worker);
        let metadata = CommandMetadata::for_user(&user);

        assert_eq!(metadata.user_id.as_str(), "w-1");
        assert_eq!(metadata.role, Role::Worker);
        assert!(metadata.source().is_none());
    }

    #[test]
    fn correlation_id_returns_set_value() {
        let metadata = CommandMetadata::test_fixture("r-1", Role::Resident);
        assert_eq!(metadata.correlation_id(), "test-correlation-id");
        assert_eq!(metadata.source(), Some("test"));
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new(UserId::new("r-1").unwrap(), Role::Resident);
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn require_enforces_capability_table() {
        let resident = CommandMetadata::test_fixture("r-1", Role::Resident);
        assert!(resident.require(Operation::SubmitComplaint).is_ok());
        assert_eq!(
            resident.require(Operation::ApproveComplaint).unwrap_err().code,
            ErrorCode::Forbidden
        );
    }

    #[test]
    fn serialization_skips_unset_fields() {
        let metadata = CommandMetadata::new(UserId::new("a-1").unwrap(), Role::Admin);
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"role\":\"admin\""));
        assert!(!json.contains("correlation_id"));
    }
}
