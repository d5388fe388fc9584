//! GetAnalyticsHandler - counters over representatives.

use std::sync::Arc;

use crate::domain::analytics::AnalyticsSnapshot;
use crate::domain::complaint::ComplaintError;
use crate::domain::foundation::{CommandMetadata, Operation};
use crate::ports::{ComplaintReader, RepresentativeFilter, UserDirectory};

pub struct GetAnalyticsHandler {
    reader: Arc<dyn ComplaintReader>,
    users: Arc<dyn UserDirectory>,
}

impl GetAnalyticsHandler {
    pub fn new(reader: Arc<dyn ComplaintReader>, users: Arc<dyn UserDirectory>) -> Self {
        Self { reader, users }
    }

    pub async fn handle(
        &self,
        metadata: CommandMetadata,
    ) -> Result<AnalyticsSnapshot, ComplaintError> {
        metadata.require(Operation::ViewAnalytics)?;
        let reps = self
            .reader
            .list_representatives(&RepresentativeFilter::all())
            .await?;
        let active_workers = self.users.count_active_workers().await?;
        Ok(AnalyticsSnapshot::compute(&reps, active_workers))
    }
}
