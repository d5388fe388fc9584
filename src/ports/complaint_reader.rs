//! Complaint reader port (query side).

use async_trait::async_trait;

use crate::domain::clustering::ClusterKey;
use crate::domain::complaint::{Complaint, ComplaintStatus, TransitionRecord};
use crate::domain::foundation::{ComplaintId, DomainError, UserId};

/// Filter over representatives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepresentativeFilter {
    pub status: Option<ComplaintStatus>,
    pub assigned_worker_id: Option<UserId>,
}

impl RepresentativeFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(status: ComplaintStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn assigned_to(worker_id: UserId) -> Self {
        Self {
            assigned_worker_id: Some(worker_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, complaint: &Complaint) -> bool {
        let Some(lifecycle) = complaint.lifecycle() else {
            return false;
        };
        self.status.map_or(true, |s| s == lifecycle.status)
            && self
                .assigned_worker_id
                .as_ref()
                .map_or(true, |w| lifecycle.assigned_worker_id.as_ref() == Some(w))
    }
}

/// Read-only queries over complaints.
#[async_trait]
pub trait ComplaintReader: Send + Sync {
    /// Active representatives sharing `key`.
    async fn find_active_representatives(
        &self,
        key: &ClusterKey,
    ) -> Result<Vec<Complaint>, DomainError>;

    /// Complaints filed by `author_id`, newest first.
    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Complaint>, DomainError>;

    /// Representatives matching `filter`, newest first.
    async fn list_representatives(
        &self,
        filter: &RepresentativeFilter,
    ) -> Result<Vec<Complaint>, DomainError>;

    /// Complaints with the given ids; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[ComplaintId]) -> Result<Vec<Complaint>, DomainError>;

    /// Duplicates pointing at `representative_id`.
    async fn list_duplicates(
        &self,
        representative_id: &ComplaintId,
    ) -> Result<Vec<Complaint>, DomainError>;

    /// Audit trail of a representative, oldest first.
    async fn transition_history(
        &self,
        complaint_id: &ComplaintId,
    ) -> Result<Vec<TransitionRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complaint_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ComplaintReader) {}
    }

    #[test]
    fn filter_only_matches_representatives() {
        use crate::domain::complaint::{Category, ComplaintDraft, ComplaintType, Priority};
        use crate::domain::foundation::Timestamp;

        let rep = ComplaintDraft::new(
            UserId::new("r").unwrap(),
            ComplaintType::CommonArea,
            "1",
            None,
            Category::Cleaning,
            "Dirty common area",
            None,
            None,
        )
        .unwrap()
        .into_representative(Priority::Low, Timestamp::now());
        let dup = ComplaintDraft::new(
            UserId::new("s").unwrap(),
            ComplaintType::CommonArea,
            "1",
            None,
            Category::Cleaning,
            "Dirty common area",
            None,
            None,
        )
        .unwrap()
        .into_duplicate(*rep.id(), Priority::Low, Timestamp::now());

        assert!(RepresentativeFilter::all().matches(&rep));
        assert!(!RepresentativeFilter::all().matches(&dup));
        assert!(!RepresentativeFilter::with_status(ComplaintStatus::Completed).matches(&rep));
        assert!(!RepresentativeFilter::assigned_to(UserId::new("w").unwrap()).matches(&rep));
    }
}
