use axum::{
    routing::{get, put},
    Router,
};

use super::super::state::AppState;
use super::handlers::{list_notifications, mark_notification_read};

/// Inbox routes, relative to `/api`.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id/read", put(mark_notification_read))
}
