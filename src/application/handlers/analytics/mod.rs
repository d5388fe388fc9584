//! Admin dashboard queries.

mod get_analytics;

pub use get_analytics::GetAnalyticsHandler;
