//! Resolving duplicates to views in bulk.

use std::collections::{HashMap, HashSet};

use crate::domain::complaint::{Complaint, ComplaintError, ComplaintView};
use crate::domain::foundation::ComplaintId;
use crate::ports::ComplaintReader;

/// Builds views for `complaints`, loading each distinct representative once.
pub(crate) async fn resolve_views(
    reader: &dyn ComplaintReader,
    complaints: Vec<Complaint>,
) -> Result<Vec<ComplaintView>, ComplaintError> {
    let missing: Vec<ComplaintId> = complaints
        .iter()
        .filter_map(|c| c.representative_id().copied())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let representatives: HashMap<ComplaintId, Complaint> = if missing.is_empty() {
        HashMap::new()
    } else {
        reader
            .find_by_ids(&missing)
            .await?
            .into_iter()
            .map(|c| (*c.id(), c))
            .collect()
    };

    complaints
        .iter()
        .map(|c| {
            let rep = c.representative_id().and_then(|id| representatives.get(id));
            ComplaintView::resolve(c, rep).map_err(ComplaintError::from)
        })
        .collect()
}
