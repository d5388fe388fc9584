//! Complaint aggregate.
//!
//! A complaint is either the representative of its cluster, carrying the
//! lifecycle state, or a duplicate that only points at its representative.
//! Duplicates never carry status, assignment, resolution, count or version.

use serde::{Deserialize, Serialize};

use crate::domain::clustering::ClusterKey;
use crate::domain::foundation::{
    check_capability, ComplaintId, DomainError, ErrorCode, Role, StateMachine, Timestamp,
    TransitionId, UserId,
};

use super::values::{
    bounded_text, optional_text, MAX_DESCRIPTION_LENGTH, MAX_LOCATION_LENGTH,
};
use super::{
    Category, ComplaintStatus, ComplaintType, Priority, Subcategory, Transition,
    TransitionRecord, WorkOutcome,
};

/// Maximum length for an attachment reference.
pub const MAX_MEDIA_URL_LENGTH: usize = 2048;

// ════════════════════════════════════════════════════════════════════════════════
// Draft
// ════════════════════════════════════════════════════════════════════════════════

/// Validated resident input, not yet placed in a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintDraft {
    pub author_id: UserId,
    pub complaint_type: ComplaintType,
    pub floor: String,
    pub room: Option<String>,
    pub category: Category,
    pub subcategory: Subcategory,
    pub description: Option<String>,
    pub media_url: Option<String>,
}

impl ComplaintDraft {
    /// Validates raw submission fields.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a blank or over-long floor, a subcategory
    ///   outside the category's catalog, or an over-long free-text field.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        author_id: UserId,
        complaint_type: ComplaintType,
        floor: &str,
        room: Option<String>,
        category: Category,
        subcategory: &str,
        description: Option<String>,
        media_url: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            author_id,
            complaint_type,
            floor: bounded_text("floor", floor, MAX_LOCATION_LENGTH)?,
            room: optional_text("room", room, MAX_LOCATION_LENGTH)?,
            category,
            subcategory: Subcategory::new(category, subcategory)?,
            description: optional_text("description", description, MAX_DESCRIPTION_LENGTH)?,
            media_url: optional_text("media_url", media_url, MAX_MEDIA_URL_LENGTH)?,
        })
    }

    /// Key used to look for an open cluster; `None` when the draft never clusters.
    pub fn cluster_key(&self) -> Option<ClusterKey> {
        ClusterKey::for_draft(self)
    }

    /// Builds a fresh representative with `count = 1`.
    pub fn into_representative(self, priority: Priority, now: Timestamp) -> Complaint {
        self.build(
            Membership::Representative(Lifecycle::new()),
            priority,
            now,
        )
    }

    /// Builds a duplicate pointing at `representative_id`.
    pub fn into_duplicate(
        self,
        representative_id: ComplaintId,
        priority: Priority,
        now: Timestamp,
    ) -> Complaint {
        self.build(Membership::Duplicate { representative_id }, priority, now)
    }

    fn build(self, membership: Membership, priority: Priority, now: Timestamp) -> Complaint {
        Complaint {
            id: ComplaintId::new(),
            author_id: self.author_id,
            complaint_type: self.complaint_type,
            floor: self.floor,
            room: self.room,
            category: self.category,
            subcategory: self.subcategory,
            description: self.description,
            media_url: self.media_url,
            priority,
            membership,
            created_at: now,
            updated_at: now,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Lifecycle
// ════════════════════════════════════════════════════════════════════════════════

/// Mutable workflow state, owned by representatives only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub status: ComplaintStatus,
    /// 1 + number of duplicates pointing at this representative.
    pub count: u32,
    pub assigned_worker_id: Option<UserId>,
    /// Present only while awaiting admin review.
    pub outcome: Option<WorkOutcome>,
    pub rejection_reason: Option<String>,
    pub resolution: Option<String>,
    pub resolved_at: Option<Timestamp>,
    pub version: u64,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            status: ComplaintStatus::Pending,
            count: 1,
            assigned_worker_id: None,
            outcome: None,
            rejection_reason: None,
            resolution: None,
            resolved_at: None,
            version: 1,
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Cluster role of a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Membership {
    Representative(Lifecycle),
    Duplicate { representative_id: ComplaintId },
}

// ════════════════════════════════════════════════════════════════════════════════
// Complaint
// ════════════════════════════════════════════════════════════════════════════════

/// A resident's maintenance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    id: ComplaintId,
    author_id: UserId,
    complaint_type: ComplaintType,
    floor: String,
    room: Option<String>,
    category: Category,
    subcategory: Subcategory,
    description: Option<String>,
    media_url: Option<String>,
    priority: Priority,
    membership: Membership,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Complaint {
    /// Reconstitute a complaint from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ComplaintId,
        author_id: UserId,
        complaint_type: ComplaintType,
        floor: String,
        room: Option<String>,
        category: Category,
        subcategory: Subcategory,
        description: Option<String>,
        media_url: Option<String>,
        priority: Priority,
        membership: Membership,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            author_id,
            complaint_type,
            floor,
            room,
            category,
            subcategory,
            description,
            media_url,
            priority,
            membership,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ComplaintId {
        &self.id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn complaint_type(&self) -> ComplaintType {
        self.complaint_type
    }

    pub fn floor(&self) -> &str {
        &self.floor
    }

    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subcategory(&self) -> &Subcategory {
        &self.subcategory
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn media_url(&self) -> Option<&str> {
        self.media_url.as_deref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Lifecycle state, or `None` for a duplicate.
    pub fn lifecycle(&self) -> Option<&Lifecycle> {
        match &self.membership {
            Membership::Representative(lifecycle) => Some(lifecycle),
            Membership::Duplicate { .. } => None,
        }
    }

    pub fn is_representative(&self) -> bool {
        matches!(self.membership, Membership::Representative(_))
    }

    pub fn representative_id(&self) -> Option<&ComplaintId> {
        match &self.membership {
            Membership::Representative(_) => None,
            Membership::Duplicate { representative_id } => Some(representative_id),
        }
    }

    /// Id of the complaint that carries this complaint's lifecycle.
    pub fn cluster_id(&self) -> &ComplaintId {
        self.representative_id().unwrap_or(&self.id)
    }

    /// Status of a representative; `None` for duplicates.
    pub fn status(&self) -> Option<ComplaintStatus> {
        self.lifecycle().map(|l| l.status)
    }

    pub fn version(&self) -> Option<u64> {
        self.lifecycle().map(|l| l.version)
    }

    pub fn cluster_key(&self) -> Option<ClusterKey> {
        ClusterKey::for_complaint(self)
    }

    /// True for representatives that can still absorb duplicates.
    pub fn is_active_representative(&self) -> bool {
        self.lifecycle().map_or(false, |l| l.status.is_active())
    }

    pub fn is_assigned_to(&self, worker_id: &UserId) -> bool {
        self.lifecycle()
            .and_then(|l| l.assigned_worker_id.as_ref())
            .map_or(false, |w| w == worker_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cluster bookkeeping
    // ─────────────────────────────────────────────────────────────────────────

    /// Increments the duplicate count of an active representative.
    ///
    /// # Errors
    ///
    /// - `NotRepresentative` on a duplicate
    /// - `ConcurrencyConflict` if the representative has reached a terminal status
    pub fn absorb_duplicate(&mut self, now: Timestamp) -> Result<u32, DomainError> {
        let id = self.id;
        let lifecycle = self.lifecycle_mut()?;
        if !lifecycle.status.is_active() {
            return Err(DomainError::conflict(format!(
                "Representative {} is no longer active",
                id
            )));
        }
        lifecycle.count += 1;
        let count = lifecycle.count;
        self.updated_at = now;
        Ok(count)
    }

    /// Overwrites the cluster count with the store's authoritative value.
    pub fn sync_count(&mut self, count: u32) {
        if let Membership::Representative(lifecycle) = &mut self.membership {
            lifecycle.count = count;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks whether `transition` may be applied by this actor right now.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the role may not perform it, or a worker is not the assignee
    /// - `NotRepresentative` on a duplicate
    /// - `InvalidStateTransition` if the current status is not an allowed source,
    ///   or differs from `expected`
    /// - `ValidationFailed` for blank required input
    pub fn check_transition(
        &self,
        transition: &Transition,
        actor_id: &UserId,
        actor_role: Role,
        expected: Option<ComplaintStatus>,
    ) -> Result<(), DomainError> {
        check_capability(actor_id, actor_role, transition.operation())?;

        let lifecycle = self.lifecycle().ok_or_else(|| self.not_representative())?;

        if transition.requires_assignment() && !self.is_assigned_to(actor_id) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Task is not assigned to this worker",
            )
            .with_detail("complaint_id", self.id.to_string()));
        }

        let current = lifecycle.status;
        if let Some(expected) = expected {
            if expected != current {
                return Err(DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    format!("Expected status '{}' but found '{}'", expected, current),
                )
                .with_detail("expected", expected.as_str())
                .with_detail("actual", current.as_str()));
            }
        }
        if !transition.allowed_sources().contains(&current) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot {} a complaint in status '{}'",
                    transition.action(),
                    current
                ),
            )
            .with_detail("action", transition.action().as_str())
            .with_detail("from", current.as_str()));
        }
        current.transition_to(transition.target())?;

        match transition {
            Transition::Reject { reason } => {
                bounded_text("rejection_reason", reason, MAX_DESCRIPTION_LENGTH)?;
            }
            Transition::SubmitWork {
                resolution,
                proof_media,
                ..
            } => {
                bounded_text("resolution", resolution, MAX_DESCRIPTION_LENGTH)?;
                optional_text("proof_media", proof_media.clone(), MAX_MEDIA_URL_LENGTH)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Applies a transition, returning the audit record to persist with it.
    ///
    /// Bumps `version` so the store can compare-and-set against the
    /// version the caller read.
    pub fn apply(
        &mut self,
        transition: Transition,
        actor_id: &UserId,
        actor_role: Role,
        expected: Option<ComplaintStatus>,
        now: Timestamp,
    ) -> Result<TransitionRecord, DomainError> {
        self.check_transition(&transition, actor_id, actor_role, expected)?;

        let complaint_id = self.id;
        let action = transition.action();
        let target = transition.target();
        let lifecycle = self.lifecycle_mut()?;
        let from = lifecycle.status;

        let mut rationale = None;
        let mut recorded_outcome = None;
        let mut proof = None;

        match transition {
            Transition::Approve { worker_id } => {
                lifecycle.assigned_worker_id = Some(worker_id);
            }
            Transition::Reject { reason } => {
                let reason = bounded_text("rejection_reason", &reason, MAX_DESCRIPTION_LENGTH)?;
                lifecycle.rejection_reason = Some(reason.clone());
                rationale = Some(reason);
            }
            Transition::BeginWork => {}
            Transition::SubmitWork {
                outcome,
                resolution,
                proof_media,
            } => {
                let resolution = bounded_text("resolution", &resolution, MAX_DESCRIPTION_LENGTH)?;
                lifecycle.resolution = Some(resolution.clone());
                lifecycle.outcome = Some(outcome);
                rationale = Some(resolution);
                recorded_outcome = Some(outcome);
                proof = optional_text("proof_media", proof_media, MAX_MEDIA_URL_LENGTH)?;
            }
            Transition::AcceptReview => {
                lifecycle.outcome = None;
                lifecycle.resolved_at = Some(now);
            }
            Transition::RequestChanges => {
                lifecycle.outcome = None;
            }
        }

        lifecycle.status = target;
        lifecycle.version += 1;
        self.updated_at = now;

        Ok(TransitionRecord {
            id: TransitionId::new(),
            complaint_id,
            action,
            from_status: from,
            to_status: target,
            actor_id: actor_id.clone(),
            actor_role,
            rationale,
            outcome: recorded_outcome,
            proof_media: proof,
            occurred_at: now,
        })
    }

    fn lifecycle_mut(&mut self) -> Result<&mut Lifecycle, DomainError> {
        let id = self.id;
        match &mut self.membership {
            Membership::Representative(lifecycle) => Ok(lifecycle),
            Membership::Duplicate { representative_id } => Err(DomainError::new(
                ErrorCode::NotRepresentative,
                format!("Complaint {} is a duplicate of {}", id, representative_id),
            )
            .with_detail("complaint_id", id.to_string())
            .with_detail("representative_id", representative_id.to_string())),
        }
    }

    fn not_representative(&self) -> DomainError {
        let rep = self.representative_id().copied().unwrap_or(self.id);
        DomainError::new(
            ErrorCode::NotRepresentative,
            format!("Complaint {} is a duplicate of {}", self.id, rep),
        )
        .with_detail("complaint_id", self.id.to_string())
        .with_detail("representative_id", rep.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> UserId {
        UserId::new("admin-1").unwrap()
    }

    fn worker() -> UserId {
        UserId::new("worker-1").unwrap()
    }

    fn draft() -> ComplaintDraft {
        ComplaintDraft::new(
            UserId::new("resident-1").unwrap(),
            ComplaintType::CommonArea,
            "2",
            None,
            Category::Electrical,
            "Light not working",
            Some("Corridor light is out".into()),
            None,
        )
        .unwrap()
    }

    fn pending() -> Complaint {
        draft().into_representative(Priority::Low, Timestamp::now())
    }

    fn assigned() -> Complaint {
        let mut c = pending();
        c.apply(
            Transition::Approve { worker_id: worker() },
            &admin(),
            Role::Admin,
            None,
            Timestamp::now(),
        )
        .unwrap();
        c
    }

    fn submit(outcome: WorkOutcome, text: &str) -> Transition {
        Transition::SubmitWork {
            outcome,
            resolution: text.into(),
            proof_media: None,
        }
    }

    #[test]
    fn new_representative_starts_pending_with_count_one() {
        let c = pending();
        let lifecycle = c.lifecycle().unwrap();
        assert_eq!(lifecycle.status, ComplaintStatus::Pending);
        assert_eq!(lifecycle.count, 1);
        assert_eq!(lifecycle.version, 1);
        assert!(c.representative_id().is_none());
    }

    #[test]
    fn draft_rejects_subcategory_from_other_catalog() {
        let err = ComplaintDraft::new(
            UserId::new("r").unwrap(),
            ComplaintType::CommonArea,
            "1",
            None,
            Category::Plumbing,
            "Broken door",
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"subcategory".to_string()));
    }

    #[test]
    fn approve_assigns_worker_and_bumps_version() {
        let c = assigned();
        let lifecycle = c.lifecycle().unwrap();
        assert_eq!(lifecycle.status, ComplaintStatus::Assigned);
        assert_eq!(lifecycle.assigned_worker_id, Some(worker()));
        assert_eq!(lifecycle.version, 2);
    }

    #[test]
    fn worker_cannot_approve() {
        let mut c = pending();
        let err = c
            .apply(
                Transition::Approve { worker_id: worker() },
                &worker(),
                Role::Worker,
                None,
                Timestamp::now(),
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(c.status(), Some(ComplaintStatus::Pending));
    }

    #[test]
    fn unassigned_worker_is_forbidden() {
        let mut c = assigned();
        let stranger = UserId::new("worker-2").unwrap();
        let err = c
            .apply(Transition::BeginWork, &stranger, Role::Worker, None, Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn submit_records_outcome_and_resolution() {
        let mut c = assigned();
        let record = c
            .apply(
                submit(WorkOutcome::CannotBeResolved, "Needs a new panel"),
                &worker(),
                Role::Worker,
                None,
                Timestamp::now(),
            )
            .unwrap();

        let lifecycle = c.lifecycle().unwrap();
        assert_eq!(lifecycle.status, ComplaintStatus::AwaitingReview);
        assert_eq!(lifecycle.outcome, Some(WorkOutcome::CannotBeResolved));
        assert_eq!(lifecycle.resolution.as_deref(), Some("Needs a new panel"));
        assert_eq!(record.from_status, ComplaintStatus::Assigned);
        assert_eq!(record.outcome, Some(WorkOutcome::CannotBeResolved));
    }

    #[test]
    fn draft_rejects_overlong_floor() {
        let err = ComplaintDraft::new(
            UserId::new("r").unwrap(),
            ComplaintType::CommonArea,
            &"9".repeat(10_000),
            None,
            Category::Plumbing,
            "Leaking tap",
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"floor".to_string()));

        let at_limit = ComplaintDraft::new(
            UserId::new("r").unwrap(),
            ComplaintType::CommonArea,
            &"9".repeat(MAX_LOCATION_LENGTH),
            None,
            Category::Plumbing,
            "Leaking tap",
            None,
            None,
        );
        assert!(at_limit.is_ok());
    }

    #[test]
    fn overlong_rejection_reason_fails_validation() {
        let mut c = pending();
        let reason = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
        let err = c
            .apply(
                Transition::Reject { reason },
                &admin(),
                Role::Admin,
                None,
                Timestamp::now(),
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(c.status(), Some(ComplaintStatus::Pending));
        assert_eq!(c.version(), Some(1));
    }

    #[test]
    fn overlong_resolution_fails_validation() {
        let mut c = assigned();
        let text = "y".repeat(MAX_DESCRIPTION_LENGTH + 1);
        let err = c
            .apply(submit(WorkOutcome::Resolved, &text), &worker(), Role::Worker, None, Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"resolution".to_string()));
        assert_eq!(c.status(), Some(ComplaintStatus::Assigned));
    }

    #[test]
    fn blank_resolution_fails_validation() {
        let mut c = assigned();
        let err = c
            .apply(submit(WorkOutcome::Resolved, "   "), &worker(), Role::Worker, None, Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(c.lifecycle().unwrap().version, 2);
    }

    #[test]
    fn accept_clears_outcome_and_sets_resolved_at() {
        let mut c = assigned();
        c.apply(submit(WorkOutcome::Resolved, "done"), &worker(), Role::Worker, None, Timestamp::now())
            .unwrap();
        let now = Timestamp::now();
        c.apply(Transition::AcceptReview, &admin(), Role::Admin, None, now)
            .unwrap();

        let lifecycle = c.lifecycle().unwrap();
        assert_eq!(lifecycle.status, ComplaintStatus::Completed);
        assert_eq!(lifecycle.outcome, None);
        assert_eq!(lifecycle.resolved_at, Some(now));
    }

    #[test]
    fn request_changes_clears_outcome() {
        let mut c = assigned();
        c.apply(submit(WorkOutcome::Resolved, "done"), &worker(), Role::Worker, None, Timestamp::now())
            .unwrap();
        c.apply(Transition::RequestChanges, &admin(), Role::Admin, None, Timestamp::now())
            .unwrap();

        let lifecycle = c.lifecycle().unwrap();
        assert_eq!(lifecycle.status, ComplaintStatus::RequestedChanges);
        assert_eq!(lifecycle.outcome, None);
    }

    #[test]
    fn expected_status_mismatch_is_invalid_transition() {
        let mut c = pending();
        let err = c
            .apply(
                Transition::Reject { reason: "spam".into() },
                &admin(),
                Role::Admin,
                Some(ComplaintStatus::Assigned),
                Timestamp::now(),
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn wrong_source_state_is_invalid_transition() {
        let mut c = pending();
        let err = c
            .apply(Transition::AcceptReview, &admin(), Role::Admin, None, Timestamp::now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn duplicates_cannot_transition() {
        let rep = pending();
        let mut dup = draft().into_duplicate(*rep.id(), Priority::Low, Timestamp::now());
        let err = dup
            .apply(
                Transition::Reject { reason: "x".into() },
                &admin(),
                Role::Admin,
                None,
                Timestamp::now(),
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotRepresentative);
        assert_eq!(dup.cluster_id(), rep.id());
    }

    #[test]
    fn absorb_duplicate_refuses_terminal_representative() {
        let mut c = pending();
        assert_eq!(c.absorb_duplicate(Timestamp::now()).unwrap(), 2);

        c.apply(
            Transition::Reject { reason: "not ours".into() },
            &admin(),
            Role::Admin,
            None,
            Timestamp::now(),
        )
        .unwrap();
        let err = c.absorb_duplicate(Timestamp::now()).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(c.lifecycle().unwrap().count, 2);
    }
}
