//! Cluster matching key.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::complaint::{Category, Complaint, ComplaintDraft, ComplaintType, Subcategory};

/// Identity of a shared facility fault.
///
/// Only common-area complaints have a key; personal-room complaints never
/// cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterKey {
    pub floor: String,
    pub category: Category,
    pub subcategory: Subcategory,
}

impl ClusterKey {
    fn build(
        complaint_type: ComplaintType,
        floor: &str,
        category: Category,
        subcategory: &Subcategory,
    ) -> Option<Self> {
        match complaint_type {
            ComplaintType::CommonArea => Some(Self {
                floor: floor.to_string(),
                category,
                subcategory: subcategory.clone(),
            }),
            ComplaintType::PersonalRoom => None,
        }
    }

    pub fn for_draft(draft: &ComplaintDraft) -> Option<Self> {
        Self::build(
            draft.complaint_type,
            &draft.floor,
            draft.category,
            &draft.subcategory,
        )
    }

    pub fn for_complaint(complaint: &Complaint) -> Option<Self> {
        Self::build(
            complaint.complaint_type(),
            complaint.floor(),
            complaint.category(),
            complaint.subcategory(),
        )
    }

    /// The complaint type every keyed complaint shares.
    pub fn complaint_type(&self) -> ComplaintType {
        ComplaintType::CommonArea
    }

    pub fn matches(&self, complaint: &Complaint) -> bool {
        Self::for_complaint(complaint).as_ref() == Some(self)
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/floor {}/{}/{}",
            self.complaint_type(),
            self.floor,
            self.category,
            self.subcategory
        )
    }
}
