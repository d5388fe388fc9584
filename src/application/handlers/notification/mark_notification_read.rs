//! MarkNotificationReadHandler - marks one of the caller's notifications read.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, NotificationId, Operation};
use crate::domain::notification::NotificationError;
use crate::ports::NotificationRepository;

pub struct MarkNotificationReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkNotificationReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Another user's notification is reported as not found.
    pub async fn handle(
        &self,
        id: NotificationId,
        metadata: CommandMetadata,
    ) -> Result<(), NotificationError> {
        metadata.require(Operation::ReadNotifications)?;
        Ok(self.notifications.mark_read(&id, &metadata.user_id).await?)
    }
}
