//! Notification repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Most recent first, at most `limit` entries.
    async fn list_for_recipient(
        &self,
        recipient_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, DomainError>;

    /// Marks a recipient's notification read.
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if no such notification belongs to `recipient_id`
    async fn mark_read(
        &self,
        id: &NotificationId,
        recipient_id: &UserId,
    ) -> Result<(), DomainError>;
}
