//! Per-user notification endpoints.

mod handlers;
mod routes;

pub use routes::notification_routes;
