//! Complaint command and query handlers.

mod approve_complaint;
mod create_complaint;
mod get_complaint_history;
mod list_admin_complaints;
mod list_resident_complaints;
mod list_worker_tasks;
mod listing;
mod reject_complaint;
mod review_complaint;
mod start_work;
mod transition_executor;
mod update_task_status;
mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use approve_complaint::{ApproveComplaintCommand, ApproveComplaintHandler};
pub use create_complaint::{
    CreateComplaintCommand, CreateComplaintHandler, DEFAULT_CLUSTER_ATTEMPTS,
};
pub use get_complaint_history::GetComplaintHistoryHandler;
pub use list_admin_complaints::{AdminFilter, ListAdminComplaintsHandler};
pub use list_resident_complaints::ListResidentComplaintsHandler;
pub use list_worker_tasks::{ListWorkerTasksHandler, TaskBucket};
pub use listing::{ComplaintListing, PersonSummary};
pub use reject_complaint::{RejectComplaintCommand, RejectComplaintHandler};
pub use review_complaint::{ReviewAction, ReviewComplaintCommand, ReviewComplaintHandler};
pub use start_work::{StartWorkCommand, StartWorkHandler};
pub use transition_executor::{
    CommittedTransition, TransitionExecutor, DEFAULT_TRANSITION_ATTEMPTS,
};
pub use update_task_status::{UpdateTaskStatusCommand, UpdateTaskStatusHandler};
