//! HTTP adapter - REST API over the application handlers.
//!
//! Every route lives under `/api`. Identity is forwarded by the gateway and
//! parsed by `middleware::auth_middleware`.

pub mod complaint;
pub mod error;
pub mod middleware;
pub mod notification;
mod state;

use axum::Router;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// Complete API router with identity middleware applied.
///
/// ```ignore
/// let app = api_router(state)
///     .layer(TraceLayer::new_for_http());
/// axum::serve(listener, app).await?;
/// ```
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(complaint::complaint_routes())
        .merge(notification::notification_routes());

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::auth_middleware))
        .with_state(state)
}
