//! Titles and messages sent to users.

use crate::domain::complaint::{Category, ComplaintType};
use crate::domain::foundation::{ComplaintId, Timestamp, UserId};

use super::Notification;

/// What a notification announces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// To admins.
    NewComplaint { complaint_type: ComplaintType },
    /// To reporters.
    Approved,
    /// To the assigned worker.
    TaskAssigned { category: Category },
    /// To reporters.
    Rejected { reason: String },
    /// To admins when the worker moves a task.
    WorkerUpdate { label: String },
    /// To reporters when the worker moves a task.
    StatusUpdate { label: String },
    /// To reporters.
    Completed,
    /// To the assigned worker.
    ChangesRequested,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::NewComplaint { .. } => "New Complaint",
            Notice::Approved => "Complaint Approved",
            Notice::TaskAssigned { .. } => "New Task Assigned",
            Notice::Rejected { .. } => "Complaint Rejected",
            Notice::WorkerUpdate { .. } | Notice::StatusUpdate { .. } => "Task Update",
            Notice::Completed => "Complaint Completed",
            Notice::ChangesRequested => "Changes Requested",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::NewComplaint { complaint_type } => format!(
                "New {} complaint submitted",
                complaint_type.as_str().replace('_', " ")
            ),
            Notice::Approved => {
                "Your complaint has been approved and assigned to a worker".to_string()
            }
            Notice::TaskAssigned { category } => {
                format!("You have been assigned a new task: {}", category)
            }
            Notice::Rejected { reason } => {
                format!("Your complaint has been rejected. Reason: {}", reason)
            }
            Notice::WorkerUpdate { label } => format!("Worker has marked task as {}", label),
            Notice::StatusUpdate { label } => {
                format!("Your complaint status has been updated to: {}", label)
            }
            Notice::Completed => {
                "Your complaint has been resolved and marked as completed".to_string()
            }
            Notice::ChangesRequested => {
                "Admin has requested changes to your completed task".to_string()
            }
        }
    }

    pub fn to(&self, recipient: UserId, complaint_id: ComplaintId, now: Timestamp) -> Notification {
        Notification::new(recipient, complaint_id, self.title(), self.message(), now)
    }
}
