//! Pipeline analytics for administrators.

mod snapshot;

pub use snapshot::AnalyticsSnapshot;
