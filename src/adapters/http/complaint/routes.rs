//! Route table for complaint, task and roster endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    approve_complaint, complaint_history, create_complaint, get_analytics, list_admin_complaints,
    list_resident_complaints, list_worker_tasks, list_workers, reject_complaint,
    review_complaint, update_task_status,
};

/// Complaint routes, relative to `/api`.
///
/// ## Resident
/// - `GET /resident/complaints` - own complaints with effective status
/// - `POST /resident/complaints` - submit (may join an active cluster)
///
/// ## Admin
/// - `GET /admin/complaints?filter=` - representatives
/// - `PUT /admin/complaints/:id/approve` - assign a worker
/// - `PUT /admin/complaints/:id/reject`
/// - `PUT /admin/complaints/:id/review` - accept or request changes
/// - `GET /admin/workers?category=` - roster, matching trade first
/// - `GET /admin/analytics`
///
/// ## Worker
/// - `GET /worker/tasks?bucket=`
/// - `PUT /worker/tasks/:id/status` - start or submit work
///
/// ## Any role
/// - `GET /complaints/:id/history` - transition audit trail
pub fn complaint_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resident/complaints",
            get(list_resident_complaints).post(create_complaint),
        )
        .route("/admin/complaints", get(list_admin_complaints))
        .route("/admin/complaints/:id/approve", put(approve_complaint))
        .route("/admin/complaints/:id/reject", put(reject_complaint))
        .route("/admin/complaints/:id/review", put(review_complaint))
        .route("/admin/workers", get(list_workers))
        .route("/admin/analytics", get(get_analytics))
        .route("/worker/tasks", get(list_worker_tasks))
        .route("/worker/tasks/:id/status", put(update_task_status))
        .route("/complaints/:id/history", get(complaint_history))
}
