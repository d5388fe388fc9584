//! Error responses shared by every route.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::complaint::ComplaintError;
use crate::domain::foundation::{ComplaintId, NotificationId, ValidationError};
use crate::domain::notification::NotificationError;

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable code for programmatic handling.
    pub error_code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Application errors on their way out as HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Complaint(ComplaintError),
    Notification(NotificationError),
}

impl From<ComplaintError> for ApiError {
    fn from(err: ComplaintError) -> Self {
        ApiError::Complaint(err)
    }
}

impl From<NotificationError> for ApiError {
    fn from(err: NotificationError) -> Self {
        ApiError::Notification(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Complaint(ComplaintError::validation(err.field(), err.to_string()))
    }
}

pub fn parse_complaint_id(raw: &str) -> Result<ComplaintId, ApiError> {
    raw.parse()
        .map_err(|_| ValidationError::invalid_format("complaint_id", "not a UUID").into())
}

pub fn parse_notification_id(raw: &str) -> Result<NotificationId, ApiError> {
    raw.parse()
        .map_err(|_| ValidationError::invalid_format("notification_id", "not a UUID").into())
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Complaint(err) => match err {
                ComplaintError::NotFound(_) => StatusCode::NOT_FOUND,
                ComplaintError::Forbidden(_) => StatusCode::FORBIDDEN,
                ComplaintError::InvalidTransition(_) | ComplaintError::NotRepresentative(_) => {
                    StatusCode::CONFLICT
                }
                ComplaintError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                ComplaintError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Notification(err) => match err {
                NotificationError::NotFound(_) => StatusCode::NOT_FOUND,
                NotificationError::Forbidden(_) => StatusCode::FORBIDDEN,
                NotificationError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Complaint(ComplaintError::ValidationFailed { field, message }) => {
                ErrorResponse::with_details(
                    "VALIDATION_FAILED",
                    message.clone(),
                    serde_json::json!({ "field": field }),
                )
            }
            ApiError::Complaint(ComplaintError::Infrastructure(_))
            | ApiError::Notification(NotificationError::Infrastructure(_)) => {
                ErrorResponse::new("DATABASE_ERROR", "Internal error")
            }
            ApiError::Complaint(err) => ErrorResponse::new(err.code().as_str(), err.to_string()),
            ApiError::Notification(err) => {
                ErrorResponse::new(err.code().as_str(), err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn complaint_errors_map_to_distinct_statuses() {
        let id = ComplaintId::new();
        assert_eq!(status_of(ComplaintError::forbidden("no")), StatusCode::FORBIDDEN);
        assert_eq!(status_of(ComplaintError::invalid_transition("no")), StatusCode::CONFLICT);
        assert_eq!(status_of(ComplaintError::NotRepresentative(id)), StatusCode::CONFLICT);
        assert_eq!(status_of(ComplaintError::NotFound(id)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ComplaintError::validation("reason", "empty")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ComplaintError::infrastructure("pool closed")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn notification_not_found_is_404() {
        assert_eq!(
            status_of(NotificationError::NotFound(NotificationId::new())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn infrastructure_details_stay_in_the_logs() {
        let body = ApiError::from(ComplaintError::infrastructure("password=hunter2")).body();
        assert_eq!(body.error_code, "DATABASE_ERROR");
        assert!(!body.message.contains("hunter2"));
    }

    #[test]
    fn validation_body_names_the_field() {
        let body = ApiError::from(ComplaintError::validation("reason", "cannot be empty")).body();
        assert_eq!(body.error_code, "VALIDATION_FAILED");
        assert_eq!(body.details.unwrap()["field"], "reason");
    }

    #[test]
    fn malformed_ids_are_bad_requests() {
        let err = parse_complaint_id("not-a-uuid").unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert!(parse_notification_id(&NotificationId::new().to_string()).is_ok());
    }
}
