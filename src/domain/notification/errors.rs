use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId};

/// Errors surfaced by notification operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notification not found: {0}")]
    NotFound(NotificationId),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl NotificationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            NotificationError::NotFound(_) => ErrorCode::NotificationNotFound,
            NotificationError::Forbidden(_) => ErrorCode::Forbidden,
            NotificationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for NotificationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::NotificationNotFound => err
                .details
                .get("notification_id")
                .and_then(|id| id.parse().ok())
                .map(NotificationError::NotFound)
                .unwrap_or_else(|| NotificationError::Infrastructure(err.to_string())),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => {
                NotificationError::Forbidden(err.message)
            }
            _ => NotificationError::Infrastructure(err.to_string()),
        }
    }
}
