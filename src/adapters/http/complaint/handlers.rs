//! HTTP handlers for complaint, task and roster endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    AdminFilter, ApproveComplaintCommand, CreateComplaintCommand, RejectComplaintCommand,
    ReviewAction, ReviewComplaintCommand, StartWorkCommand, TaskBucket, UpdateTaskStatusCommand,
};
use crate::domain::complaint::{Category, ComplaintType, WorkOutcome};
use crate::domain::foundation::{UserId, ValidationError};

use super::super::error::{parse_complaint_id, ApiError};
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    expected_status, AdminComplaintsQuery, ApproveComplaintRequest, CreateComplaintRequest,
    RejectComplaintRequest, ReviewComplaintRequest, TaskStatusRequest, WorkerResponse,
    WorkerTasksQuery, WorkersQuery,
};

/// Status a worker sends to start on site.
const START_WORK_STATUS: &str = "In Progress";

// ════════════════════════════════════════════════════════════════════════════════
// Resident
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/resident/complaints
pub async fn create_complaint(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(req): Json<CreateComplaintRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateComplaintCommand {
        complaint_type: req.complaint_type.parse::<ComplaintType>()?,
        floor: req.floor,
        room: req.room,
        category: req.category.parse::<Category>()?,
        subcategory: req.subcategory,
        description: req.description,
        media_url: req.media_url,
    };

    let view = state
        .create_complaint_handler()
        .handle(cmd, auth.metadata())
        .await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/resident/complaints
pub async fn list_resident_complaints(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let views = state
        .list_resident_complaints_handler()
        .handle(auth.metadata())
        .await?;
    Ok(Json(views))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/complaints?filter=all|review|<status>
pub async fn list_admin_complaints(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(query): Query<AdminComplaintsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query
        .filter
        .as_deref()
        .unwrap_or_default()
        .parse::<AdminFilter>()?;
    let views = state
        .list_admin_complaints_handler()
        .handle(filter, auth.metadata())
        .await?;
    Ok(Json(views))
}

/// PUT /api/admin/complaints/:id/approve
pub async fn approve_complaint(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<ApproveComplaintRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ApproveComplaintCommand {
        complaint_id: parse_complaint_id(&id)?,
        worker_id: UserId::new(req.worker_id)
            .map_err(|_| ValidationError::empty_field("worker_id"))?,
        expected_status: expected_status(req.expected_status.as_deref())?,
    };
    let view = state
        .approve_complaint_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok(Json(view))
}

/// PUT /api/admin/complaints/:id/reject
pub async fn reject_complaint(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<RejectComplaintRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RejectComplaintCommand {
        complaint_id: parse_complaint_id(&id)?,
        reason: req.reason,
        expected_status: expected_status(req.expected_status.as_deref())?,
    };
    let view = state
        .reject_complaint_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok(Json(view))
}

/// PUT /api/admin/complaints/:id/review
pub async fn review_complaint(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<ReviewComplaintRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ReviewComplaintCommand {
        complaint_id: parse_complaint_id(&id)?,
        action: req.action.parse::<ReviewAction>()?,
        expected_status: expected_status(req.expected_status.as_deref())?,
    };
    let view = state
        .review_complaint_handler()
        .handle(cmd, auth.metadata())
        .await?;
    Ok(Json(view))
}

/// GET /api/admin/workers?category=
pub async fn list_workers(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(query): Query<WorkersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(str::parse::<Category>)
        .transpose()?;
    let workers = state
        .list_workers_handler()
        .handle(category, auth.metadata())
        .await?;
    Ok(Json(
        workers
            .into_iter()
            .map(WorkerResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/admin/analytics
pub async fn get_analytics(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.analytics_handler().handle(auth.metadata()).await?;
    Ok(Json(snapshot))
}

// ════════════════════════════════════════════════════════════════════════════════
// Shared
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/complaints/:id/history
pub async fn complaint_history(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state
        .complaint_history_handler()
        .handle(parse_complaint_id(&id)?, auth.metadata())
        .await?;
    Ok(Json(records))
}

// ════════════════════════════════════════════════════════════════════════════════
// Worker
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/worker/tasks?bucket=all|pending|finished
pub async fn list_worker_tasks(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(query): Query<WorkerTasksQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let bucket = query
        .bucket
        .as_deref()
        .unwrap_or_default()
        .parse::<TaskBucket>()?;
    let views = state
        .list_worker_tasks_handler()
        .handle(bucket, auth.metadata())
        .await?;
    Ok(Json(views))
}

/// PUT /api/worker/tasks/:id/status
pub async fn update_task_status(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<TaskStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let complaint_id = parse_complaint_id(&id)?;
    let expected_status = expected_status(req.expected_status.as_deref())?;

    let view = if req.status.trim() == START_WORK_STATUS {
        state
            .start_work_handler()
            .handle(
                StartWorkCommand {
                    complaint_id,
                    expected_status,
                },
                auth.metadata(),
            )
            .await?
    } else {
        let outcome = req.status.trim().parse::<WorkOutcome>().map_err(|_| {
            ValidationError::invalid_format(
                "status",
                "expected 'In Progress', 'Resolved' or 'Cannot be Resolved'",
            )
        })?;
        state
            .update_task_status_handler()
            .handle(
                UpdateTaskStatusCommand {
                    complaint_id,
                    outcome,
                    resolution: req.resolution.unwrap_or_default(),
                    proof_media: req.proof_media,
                    expected_status,
                },
                auth.metadata(),
            )
            .await?
    };
    Ok(Json(view))
}
