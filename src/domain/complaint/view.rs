//! Read model presenting a complaint with its effective lifecycle fields.

use serde::Serialize;

use crate::domain::foundation::{ComplaintId, DomainError, ErrorCode, Timestamp, UserId};

use super::{Category, Complaint, ComplaintStatus, ComplaintType, Priority, WorkOutcome};

/// A complaint as callers see it.
///
/// Lifecycle fields of a duplicate are read through its representative, so
/// every member of a cluster reports the same status and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplaintView {
    pub id: ComplaintId,
    pub author_id: UserId,
    pub complaint_type: ComplaintType,
    pub floor: String,
    pub room: Option<String>,
    pub category: Category,
    pub subcategory: String,
    pub description: Option<String>,
    pub media_url: Option<String>,
    pub priority: Priority,
    pub representative_id: Option<ComplaintId>,
    pub status: ComplaintStatus,
    pub outcome: Option<WorkOutcome>,
    pub assigned_worker_id: Option<UserId>,
    pub rejection_reason: Option<String>,
    pub resolution: Option<String>,
    pub resolved_at: Option<Timestamp>,
    /// Size of the cluster this complaint belongs to.
    pub count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ComplaintView {
    /// Builds the view of `complaint`, resolving lifecycle through
    /// `representative` when `complaint` is a duplicate.
    ///
    /// # Errors
    ///
    /// - `InternalError` if a duplicate is given without its representative,
    ///   or with a complaint that is not its representative.
    pub fn resolve(
        complaint: &Complaint,
        representative: Option<&Complaint>,
    ) -> Result<Self, DomainError> {
        let source = match complaint.representative_id() {
            None => complaint,
            Some(rep_id) => match representative {
                Some(rep) if rep.id() == rep_id => rep,
                _ => {
                    return Err(DomainError::new(
                        ErrorCode::InternalError,
                        format!("Representative {} missing for duplicate", rep_id),
                    )
                    .with_detail("complaint_id", complaint.id().to_string()))
                }
            },
        };
        let lifecycle = source.lifecycle().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Complaint {} has no lifecycle", source.id()),
            )
        })?;

        Ok(Self {
            id: *complaint.id(),
            author_id: complaint.author_id().clone(),
            complaint_type: complaint.complaint_type(),
            floor: complaint.floor().to_string(),
            room: complaint.room().map(str::to_string),
            category: complaint.category(),
            subcategory: complaint.subcategory().as_str().to_string(),
            description: complaint.description().map(str::to_string),
            media_url: complaint.media_url().map(str::to_string),
            priority: complaint.priority(),
            representative_id: complaint.representative_id().copied(),
            status: lifecycle.status,
            outcome: lifecycle.outcome,
            assigned_worker_id: lifecycle.assigned_worker_id.clone(),
            rejection_reason: lifecycle.rejection_reason.clone(),
            resolution: lifecycle.resolution.clone(),
            resolved_at: lifecycle.resolved_at,
            count: lifecycle.count,
            created_at: *complaint.created_at(),
            updated_at: *complaint.updated_at(),
        })
    }

    /// View of a representative.
    pub fn of_representative(complaint: &Complaint) -> Result<Self, DomainError> {
        Self::resolve(complaint, None)
    }

    pub fn is_duplicate(&self) -> bool {
        self.representative_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::complaint::{ComplaintDraft, Transition};
    use crate::domain::foundation::Role;

    fn draft(author: &str) -> ComplaintDraft {
        ComplaintDraft::new(
            UserId::new(author).unwrap(),
            ComplaintType::CommonArea,
            "2",
            None,
            Category::Electrical,
            "Light not working",
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn duplicate_reads_status_through_representative() {
        let mut rep = draft("resident-a").into_representative(Priority::Low, Timestamp::now());
        rep.apply(
            Transition::Approve {
                worker_id: UserId::new("worker-w").unwrap(),
            },
            &UserId::new("admin").unwrap(),
            Role::Admin,
            None,
            Timestamp::now(),
        )
        .unwrap();
        rep.absorb_duplicate(Timestamp::now()).unwrap();
        let dup = draft("resident-b").into_duplicate(*rep.id(), Priority::Low, Timestamp::now());

        let view = ComplaintView::resolve(&dup, Some(&rep)).unwrap();

        assert_eq!(view.id, *dup.id());
        assert_eq!(view.author_id.as_str(), "resident-b");
        assert_eq!(view.status, ComplaintStatus::Assigned);
        assert_eq!(view.assigned_worker_id.as_ref().map(|w| w.as_str()), Some("worker-w"));
        assert_eq!(view.count, 2);
        assert!(view.is_duplicate());
    }

    #[test]
    fn duplicate_without_representative_is_an_error() {
        let rep = draft("a").into_representative(Priority::Low, Timestamp::now());
        let dup = draft("b").into_duplicate(*rep.id(), Priority::Low, Timestamp::now());
        let other = draft("c").into_representative(Priority::Low, Timestamp::now());

        assert!(ComplaintView::resolve(&dup, None).is_err());
        assert!(ComplaintView::resolve(&dup, Some(&other)).is_err());
    }

    #[test]
    fn representative_view_uses_own_lifecycle() {
        let rep = draft("a").into_representative(Priority::High, Timestamp::now());
        let view = ComplaintView::of_representative(&rep).unwrap();
        assert_eq!(view.status, ComplaintStatus::Pending);
        assert_eq!(view.priority, Priority::High);
        assert!(!view.is_duplicate());
    }

    #[test]
    fn serializes_wire_status_string() {
        let rep = draft("a").into_representative(Priority::Low, Timestamp::now());
        let json = serde_json::to_value(ComplaintView::of_representative(&rep).unwrap()).unwrap();
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["complaint_type"], "common_area");
        assert_eq!(json["count"], 1);
    }
}
