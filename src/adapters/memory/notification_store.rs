//! In-memory notification store.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

#[derive(Default)]
pub struct InMemoryNotificationStore {
    notifications: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> DomainError {
        DomainError::new(ErrorCode::InternalError, "notification store lock poisoned")
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationStore {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        self.notifications
            .lock()
            .map_err(|_| Self::poisoned())?
            .push(notification.clone());
        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, DomainError> {
        let notifications = self.notifications.lock().map_err(|_| Self::poisoned())?;
        let mut mine: Vec<_> = notifications
            .iter()
            .filter(|n| n.is_for(recipient_id))
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        mine.truncate(limit);
        Ok(mine)
    }

    async fn mark_read(
        &self,
        id: &NotificationId,
        recipient_id: &UserId,
    ) -> Result<(), DomainError> {
        let mut notifications = self.notifications.lock().map_err(|_| Self::poisoned())?;
        let notification = notifications
            .iter_mut()
            .find(|n| &n.id == id && n.is_for(recipient_id))
            .ok_or_else(|| {
                DomainError::new(ErrorCode::NotificationNotFound, "Notification not found")
                    .with_detail("notification_id", id.to_string())
            })?;
        notification.is_read = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ComplaintId, Timestamp};

    fn note(recipient: &str, hours_ago: i64) -> Notification {
        Notification::new(
            UserId::new(recipient).unwrap(),
            ComplaintId::new(),
            "Task Update",
            "Worker has marked task as Resolved",
            Timestamp::now().minus_hours(hours_ago),
        )
    }

    #[tokio::test]
    async fn lists_newest_first_with_limit() {
        let store = InMemoryNotificationStore::new();
        let old = note("r1", 5);
        let new = note("r1", 1);
        store.save(&old).await.unwrap();
        store.save(&new).await.unwrap();
        store.save(&note("r2", 0)).await.unwrap();

        let listed = store
            .list_for_recipient(&UserId::new("r1").unwrap(), 1)
            .await
            .unwrap();
        assert_eq!(listed, vec![new]);
    }

    #[tokio::test]
    async fn cannot_mark_someone_elses_notification() {
        let store = InMemoryNotificationStore::new();
        let n = note("r1", 0);
        store.save(&n).await.unwrap();

        let err = store
            .mark_read(&n.id, &UserId::new("r2").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotificationNotFound);

        store.mark_read(&n.id, &UserId::new("r1").unwrap()).await.unwrap();
        let listed = store
            .list_for_recipient(&UserId::new("r1").unwrap(), 10)
            .await
            .unwrap();
        assert!(listed[0].is_read);
    }
}
