//! HTTP handlers for the notification inbox.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::super::error::{parse_notification_id, ApiError};
use super::super::middleware::RequireAuth;
use super::super::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let inbox = state
        .list_notifications_handler()
        .handle(auth.metadata())
        .await?;
    Ok(Json(inbox))
}

/// PUT /api/notifications/:id/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .mark_notification_read_handler()
        .handle(parse_notification_id(&id)?, auth.metadata())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
