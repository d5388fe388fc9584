//! ListNotificationsHandler - the caller's inbox.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, Operation};
use crate::domain::notification::{Notification, NotificationError};
use crate::ports::NotificationRepository;

/// Inbox size returned to clients.
pub const INBOX_LIMIT: usize = 100;

pub struct ListNotificationsHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl ListNotificationsHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Newest first, at most `INBOX_LIMIT` entries.
    pub async fn handle(
        &self,
        metadata: CommandMetadata,
    ) -> Result<Vec<Notification>, NotificationError> {
        metadata.require(Operation::ReadNotifications)?;
        Ok(self
            .notifications
            .list_for_recipient(&metadata.user_id, INBOX_LIMIT)
            .await?)
    }
}
