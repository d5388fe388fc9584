//! In-memory complaint store.
//!
//! All state sits behind one mutex, so each port primitive is atomic with
//! respect to every other. No lock is held across an await point.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::clustering::ClusterKey;
use crate::domain::complaint::{Complaint, TransitionRecord};
use crate::domain::foundation::{ComplaintId, DomainError, ErrorCode, UserId};
use crate::ports::{ComplaintReader, ComplaintRepository, RepresentativeFilter};

#[derive(Default)]
struct StoreState {
    complaints: HashMap<ComplaintId, Complaint>,
    transitions: Vec<TransitionRecord>,
}

impl StoreState {
    fn has_active_representative(&self, key: &ClusterKey) -> bool {
        self.complaints
            .values()
            .any(|c| c.is_active_representative() && key.matches(c))
    }
}

/// Complaint store for tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryComplaintStore {
    state: Mutex<StoreState>,
}

impl InMemoryComplaintStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "complaint store lock poisoned"))
    }

    /// Snapshot of every stored complaint, for assertions.
    pub fn all(&self) -> Result<Vec<Complaint>, DomainError> {
        Ok(self.lock()?.complaints.values().cloned().collect())
    }
}

fn newest_first(mut complaints: Vec<Complaint>) -> Vec<Complaint> {
    complaints.sort_by(|a, b| {
        b.created_at()
            .cmp(a.created_at())
            .then_with(|| b.id().cmp(a.id()))
    });
    complaints
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintStore {
    async fn insert_representative(&self, complaint: &Complaint) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        if let Some(key) = complaint.cluster_key() {
            if state.has_active_representative(&key) {
                return Err(DomainError::conflict(format!(
                    "An active representative already exists for {}",
                    key
                )));
            }
        }
        state.complaints.insert(*complaint.id(), complaint.clone());
        Ok(())
    }

    async fn attach_duplicate(&self, duplicate: &Complaint) -> Result<u32, DomainError> {
        let rep_id = *duplicate.representative_id().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                "attach_duplicate called with a representative",
            )
        })?;

        let mut state = self.lock()?;
        let rep = state
            .complaints
            .get_mut(&rep_id)
            .ok_or_else(|| DomainError::conflict(format!("Representative {} vanished", rep_id)))?;
        if rep.cluster_key() != duplicate.cluster_key() {
            return Err(DomainError::conflict(format!(
                "Representative {} belongs to a different cluster",
                rep_id
            )));
        }
        let count = rep.absorb_duplicate(*duplicate.created_at())?;
        state.complaints.insert(*duplicate.id(), duplicate.clone());
        Ok(count)
    }

    async fn apply_transition(
        &self,
        complaint: &Complaint,
        expected_version: u64,
        record: &TransitionRecord,
    ) -> Result<(), DomainError> {
        let mut state = self.lock()?;
        let stored = state.complaints.get(complaint.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::ComplaintNotFound, "Complaint not found")
                .with_detail("complaint_id", complaint.id().to_string())
        })?;

        if stored.version() != Some(expected_version) {
            return Err(DomainError::conflict(format!(
                "Complaint {} changed since it was read",
                complaint.id()
            ))
            .with_detail("expected_version", expected_version.to_string()));
        }

        // Count is owned by attach_duplicate; keep whatever it wrote meanwhile.
        let mut updated = complaint.clone();
        if let Some(count) = stored.lifecycle().map(|l| l.count) {
            updated.sync_count(count);
        }
        state.complaints.insert(*complaint.id(), updated);
        state.transitions.push(record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, DomainError> {
        Ok(self.lock()?.complaints.get(id).cloned())
    }
}

#[async_trait]
impl ComplaintReader for InMemoryComplaintStore {
    async fn find_active_representatives(
        &self,
        key: &ClusterKey,
    ) -> Result<Vec<Complaint>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .complaints
            .values()
            .filter(|c| c.is_active_representative() && key.matches(c))
            .cloned()
            .collect())
    }

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Complaint>, DomainError> {
        let state = self.lock()?;
        Ok(newest_first(
            state
                .complaints
                .values()
                .filter(|c| c.author_id() == author_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_representatives(
        &self,
        filter: &RepresentativeFilter,
    ) -> Result<Vec<Complaint>, DomainError> {
        let state = self.lock()?;
        Ok(newest_first(
            state
                .complaints
                .values()
                .filter(|c| filter.matches(c))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_ids(&self, ids: &[ComplaintId]) -> Result<Vec<Complaint>, DomainError> {
        let state = self.lock()?;
        Ok(ids
            .iter()
            .filter_map(|id| state.complaints.get(id).cloned())
            .collect())
    }

    async fn list_duplicates(
        &self,
        representative_id: &ComplaintId,
    ) -> Result<Vec<Complaint>, DomainError> {
        let state = self.lock()?;
        Ok(newest_first(
            state
                .complaints
                .values()
                .filter(|c| c.representative_id() == Some(representative_id))
                .cloned()
                .collect(),
        ))
    }

    async fn transition_history(
        &self,
        complaint_id: &ComplaintId,
    ) -> Result<Vec<TransitionRecord>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .transitions
            .iter()
            .filter(|r| &r.complaint_id == complaint_id)
            .cloned()
            .collect())
    }
}
