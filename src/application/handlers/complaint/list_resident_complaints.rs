//! ListResidentComplaintsHandler - a resident's own complaints.

use std::sync::Arc;

use crate::domain::complaint::{ComplaintError, ComplaintView};
use crate::domain::foundation::{CommandMetadata, Operation};
use crate::ports::ComplaintReader;

use super::views::resolve_views;

pub struct ListResidentComplaintsHandler {
    reader: Arc<dyn ComplaintReader>,
}

impl ListResidentComplaintsHandler {
    pub fn new(reader: Arc<dyn ComplaintReader>) -> Self {
        Self { reader }
    }

    /// Newest first; duplicates report their representative's lifecycle.
    pub async fn handle(
        &self,
        metadata: CommandMetadata,
    ) -> Result<Vec<ComplaintView>, ComplaintError> {
        metadata.require(Operation::ListOwnComplaints)?;
        let mine = self.reader.list_by_author(&metadata.user_id).await?;
        resolve_views(self.reader.as_ref(), mine).await
    }
}
