//! Role capability table and authorization results.
//!
//! Every mutating or privileged operation consults `permits` before touching
//! the store. Ownership rules (a worker may only touch their own tasks) are
//! checked separately by the complaint aggregate.

use super::{DomainError, ErrorCode, Role, UserId};

/// Operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SubmitComplaint,
    ListOwnComplaints,
    ListAllComplaints,
    ApproveComplaint,
    RejectComplaint,
    ReviewComplaint,
    ListWorkers,
    ViewAnalytics,
    ListAssignedTasks,
    StartWork,
    SubmitWork,
    ViewHistory,
    ReadNotifications,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SubmitComplaint => "submit_complaint",
            Operation::ListOwnComplaints => "list_own_complaints",
            Operation::ListAllComplaints => "list_all_complaints",
            Operation::ApproveComplaint => "approve_complaint",
            Operation::RejectComplaint => "reject_complaint",
            Operation::ReviewComplaint => "review_complaint",
            Operation::ListWorkers => "list_workers",
            Operation::ViewAnalytics => "view_analytics",
            Operation::ListAssignedTasks => "list_assigned_tasks",
            Operation::StartWork => "start_work",
            Operation::SubmitWork => "submit_work",
            Operation::ViewHistory => "view_history",
            Operation::ReadNotifications => "read_notifications",
        }
    }
}

/// The capability table: which roles may perform which operation.
pub fn permits(role: Role, op: Operation) -> bool {
    use Operation::*;

    match op {
        SubmitComplaint | ListOwnComplaints => role == Role::Resident,
        ListAllComplaints | ApproveComplaint | RejectComplaint | ReviewComplaint
        | ListWorkers | ViewAnalytics => role == Role::Admin,
        ListAssignedTasks | StartWork | SubmitWork => role == Role::Worker,
        ViewHistory | ReadNotifications => true,
    }
}

/// Checks the capability table, producing a `Forbidden` error on denial.
pub fn check_capability(user_id: &UserId, role: Role, op: Operation) -> Result<(), DomainError> {
    let result = if permits(role, op) {
        AuthorizationResult::granted(op.as_str(), user_id.as_str())
    } else {
        AuthorizationResult::denied(
            op.as_str(),
            user_id.as_str(),
            format!("Role '{}' may not perform '{}'", role, op.as_str()),
        )
    };
    result.into_result()
}

/// Outcome of an authorization decision.
#[derive(Debug, Clone)]
pub struct AuthorizationResult {
    pub granted: bool,
    pub action: &'static str,
    pub user_id: String,
    pub denial_reason: Option<String>,
}

impl AuthorizationResult {
    pub fn granted(action: &'static str, user_id: impl Into<String>) -> Self {
        Self {
            granted: true,
            action,
            user_id: user_id.into(),
            denial_reason: None,
        }
    }

    pub fn denied(
        action: &'static str,
        user_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            granted: false,
            action,
            user_id: user_id.into(),
            denial_reason: Some(reason.into()),
        }
    }

    /// Converts to `Result`, mapping denial to `ErrorCode::Forbidden`.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                self.denial_reason
                    .unwrap_or_else(|| "Access denied".to_string()),
            )
            .with_detail("action", self.action)
            .with_detail("user_id", self.user_id))
        }
    }

    pub fn is_granted(&self) -> bool {
        self.granted
    }
}
