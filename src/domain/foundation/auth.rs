//! Authentication types for the domain layer.
//!
//! Identity is established by an upstream gateway; these types carry the
//! result into handlers without depending on any particular provider.

use super::{Role, UserId};
use thiserror::Error;

/// Caller identity as asserted by the authentication gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub role: Role,
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, role: Role) -> Self {
        Self {
            id,
            role,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Display name if known, otherwise the raw id.
    pub fn display_name_or_id(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Failures while establishing caller identity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing identity header: {0}")]
    MissingIdentity(&'static str),

    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

impl AuthError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidIdentity(message.into())
    }

    /// True when the caller must re-authenticate rather than request access.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::MissingIdentity(_) | AuthError::InvalidIdentity(_)
        )
    }
}
