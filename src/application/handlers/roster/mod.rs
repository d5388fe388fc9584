//! Worker roster queries.

mod list_workers;

pub use list_workers::ListWorkersHandler;
