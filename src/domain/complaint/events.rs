//! Complaint domain events.
//!
//! - `ComplaintSubmitted` - a resident filed a complaint (new cluster or duplicate)
//! - `ComplaintTransitioned` - a representative's lifecycle moved

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, ComplaintId, EventId, Role, Timestamp, UserId};

use super::{
    Category, Complaint, ComplaintStatus, ComplaintType, TransitionAction, TransitionRecord,
    WorkOutcome,
};

// ════════════════════════════════════════════════════════════════════════════════
// ComplaintSubmitted
// ════════════════════════════════════════════════════════════════════════════════

/// Published after a complaint is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplaintSubmitted {
    pub event_id: EventId,
    pub complaint_id: ComplaintId,
    /// Representative carrying the lifecycle; equals `complaint_id` for a new cluster.
    pub cluster_id: ComplaintId,
    pub author_id: UserId,
    pub complaint_type: ComplaintType,
    pub category: Category,
    pub subcategory: String,
    pub floor: String,
    pub joined_existing: bool,
    /// Cluster size after this submission.
    pub cluster_count: u32,
    pub submitted_at: Timestamp,
}

domain_event!(
    ComplaintSubmitted,
    event_type = "complaint.submitted.v1",
    schema_version = 1,
    aggregate_id = complaint_id,
    aggregate_type = "Complaint",
    occurred_at = submitted_at,
    event_id = event_id
);

impl ComplaintSubmitted {
    pub fn new(complaint: &Complaint, cluster_count: u32) -> Self {
        Self {
            event_id: EventId::new(),
            complaint_id: *complaint.id(),
            cluster_id: *complaint.cluster_id(),
            author_id: complaint.author_id().clone(),
            complaint_type: complaint.complaint_type(),
            category: complaint.category(),
            subcategory: complaint.subcategory().as_str().to_string(),
            floor: complaint.floor().to_string(),
            joined_existing: !complaint.is_representative(),
            cluster_count,
            submitted_at: *complaint.created_at(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// ComplaintTransitioned
// ════════════════════════════════════════════════════════════════════════════════

/// Published after a lifecycle transition commits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplaintTransitioned {
    pub event_id: EventId,
    pub complaint_id: ComplaintId,
    pub action: TransitionAction,
    pub from_status: ComplaintStatus,
    pub to_status: ComplaintStatus,
    pub actor_id: UserId,
    pub actor_role: Role,
    /// Worker assigned after the transition.
    pub assigned_worker_id: Option<UserId>,
    pub outcome: Option<WorkOutcome>,
    pub rationale: Option<String>,
    pub occurred_at: Timestamp,
}

domain_event!(
    ComplaintTransitioned,
    event_type = "complaint.transitioned.v1",
    schema_version = 1,
    aggregate_id = complaint_id,
    aggregate_type = "Complaint",
    occurred_at = occurred_at,
    event_id = event_id
);

impl ComplaintTransitioned {
    pub fn new(complaint: &Complaint, record: &TransitionRecord) -> Self {
        Self {
            event_id: EventId::new(),
            complaint_id: record.complaint_id,
            action: record.action,
            from_status: record.from_status,
            to_status: record.to_status,
            actor_id: record.actor_id.clone(),
            actor_role: record.actor_role,
            assigned_worker_id: complaint
                .lifecycle()
                .and_then(|l| l.assigned_worker_id.clone()),
            outcome: record.outcome,
            rationale: record.rationale.clone(),
            occurred_at: record.occurred_at,
        }
    }
}
