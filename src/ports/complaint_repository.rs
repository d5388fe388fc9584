//! Complaint repository port (write side).
//!
//! Every mutation is a single atomic primitive so that clustering and
//! lifecycle transitions stay correct under concurrent requests. A lost race
//! is reported as `ConcurrencyConflict`; callers re-read and retry.

use async_trait::async_trait;

use crate::domain::complaint::{Complaint, TransitionRecord};
use crate::domain::foundation::{ComplaintId, DomainError};

/// Repository port for complaint persistence.
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Inserts a new representative.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if an active representative already exists for
    ///   the complaint's cluster key
    /// - `DatabaseError` on persistence failure
    async fn insert_representative(&self, complaint: &Complaint) -> Result<(), DomainError>;

    /// Inserts a duplicate and increments its representative's count in one
    /// atomic unit. Returns the representative's new count.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if the representative is missing or no longer active
    /// - `DatabaseError` on persistence failure
    async fn attach_duplicate(&self, duplicate: &Complaint) -> Result<u32, DomainError>;

    /// Writes a transitioned representative and its audit record, provided the
    /// stored version still equals `expected_version`.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if the stored version moved on
    /// - `ComplaintNotFound` if the complaint does not exist
    /// - `DatabaseError` on persistence failure
    async fn apply_transition(
        &self,
        complaint: &Complaint,
        expected_version: u64,
        record: &TransitionRecord,
    ) -> Result<(), DomainError>;

    /// Finds a complaint by id.
    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, DomainError>;
}
