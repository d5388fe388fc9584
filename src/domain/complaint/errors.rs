//! Complaint-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ComplaintId, DomainError, ErrorCode};

/// Errors surfaced by complaint operations.
///
/// Each kind maps to a stable `ErrorCode` and, at the HTTP edge, to a
/// distinct status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplaintError {
    #[error("Complaint not found: {0}")]
    NotFound(ComplaintId),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Complaint {0} is a duplicate; act on its representative")]
    NotRepresentative(ComplaintId),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ComplaintError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        ComplaintError::Forbidden(message.into())
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        ComplaintError::InvalidTransition(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ComplaintError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ComplaintError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ComplaintError::NotFound(_) => ErrorCode::ComplaintNotFound,
            ComplaintError::Forbidden(_) => ErrorCode::Forbidden,
            ComplaintError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            ComplaintError::NotRepresentative(_) => ErrorCode::NotRepresentative,
            ComplaintError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ComplaintError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for ComplaintError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.details.get(key).cloned();
        match err.code {
            ErrorCode::ComplaintNotFound => detail("complaint_id")
                .and_then(|id| id.parse().ok())
                .map(ComplaintError::NotFound)
                .unwrap_or_else(|| ComplaintError::Infrastructure(err.message.clone())),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => {
                ComplaintError::Forbidden(err.message)
            }
            ErrorCode::InvalidStateTransition | ErrorCode::ConcurrencyConflict => {
                ComplaintError::InvalidTransition(err.message)
            }
            ErrorCode::NotRepresentative => detail("complaint_id")
                .or_else(|| detail("representative_id"))
                .and_then(|id| id.parse().ok())
                .map(ComplaintError::NotRepresentative)
                .unwrap_or_else(|| ComplaintError::InvalidTransition(err.message.clone())),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::InvalidFormat
            | ErrorCode::UserNotFound => ComplaintError::ValidationFailed {
                field: detail("field").unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::NotificationNotFound
            | ErrorCode::DatabaseError
            | ErrorCode::InternalError => ComplaintError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        let id = ComplaintId::new();
        assert_eq!(ComplaintError::NotFound(id).code().as_str(), "COMPLAINT_NOT_FOUND");
        assert_eq!(ComplaintError::forbidden("x").code().as_str(), "FORBIDDEN");
        assert_eq!(
            ComplaintError::invalid_transition("x").code().as_str(),
            "INVALID_STATE_TRANSITION"
        );
        assert_eq!(
            ComplaintError::NotRepresentative(id).code().as_str(),
            "NOT_REPRESENTATIVE"
        );
        assert_eq!(ComplaintError::validation("f", "m").code().as_str(), "VALIDATION_FAILED");
        assert_eq!(ComplaintError::infrastructure("x").code().as_str(), "DATABASE_ERROR");
    }

    #[test]
    fn validation_domain_error_keeps_field() {
        let err: ComplaintError =
            DomainError::validation("rejection_reason", "cannot be empty").into();
        assert_eq!(
            err,
            ComplaintError::validation("rejection_reason", "cannot be empty")
        );
    }

    #[test]
    fn not_found_recovers_id_from_details() {
        let id = ComplaintId::new();
        let err: ComplaintError = DomainError::new(ErrorCode::ComplaintNotFound, "missing")
            .with_detail("complaint_id", id.to_string())
            .into();
        assert_eq!(err, ComplaintError::NotFound(id));
    }

    #[test]
    fn exhausted_conflict_surfaces_as_invalid_transition() {
        let err: ComplaintError = DomainError::conflict("status changed").into();
        assert!(matches!(err, ComplaintError::InvalidTransition(_)));
    }

    #[test]
    fn forbidden_maps_directly() {
        let err: ComplaintError = DomainError::new(ErrorCode::Forbidden, "nope").into();
        assert_eq!(err, ComplaintError::forbidden("nope"));
    }
}
