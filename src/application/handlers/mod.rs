//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each takes
//! a `CommandMetadata` and consults the capability table before touching a
//! port.

pub mod analytics;
pub mod complaint;
pub mod notification;
pub mod roster;

pub use analytics::GetAnalyticsHandler;
pub use complaint::{
    AdminFilter, ApproveComplaintCommand, ApproveComplaintHandler, CommittedTransition,
    ComplaintListing, CreateComplaintCommand, CreateComplaintHandler, GetComplaintHistoryHandler,
    ListAdminComplaintsHandler, ListResidentComplaintsHandler, ListWorkerTasksHandler,
    PersonSummary, RejectComplaintCommand, RejectComplaintHandler, ReviewAction, ReviewComplaintCommand,
    ReviewComplaintHandler, StartWorkCommand, StartWorkHandler, TaskBucket, TransitionExecutor,
    UpdateTaskStatusCommand, UpdateTaskStatusHandler,
};
pub use notification::{
    ListNotificationsHandler, MarkNotificationReadHandler, NotificationProjector,
    PROJECTED_EVENTS,
};
pub use roster::ListWorkersHandler;
