//! PostgreSQL implementation of NotificationRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{
    ComplaintId, DomainError, ErrorCode, NotificationId, Timestamp, UserId,
};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

use super::complaint_store::db_error;

#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn save(&self, notification: &Notification) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, recipient_id, complaint_id, title, message, is_read, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notification.id.as_uuid())
        .bind(notification.recipient_id.as_str())
        .bind(notification.complaint_id.as_uuid())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(notification.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert notification", e))?;

        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, recipient_id, complaint_id, title, message, is_read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(recipient_id.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list notifications", e))?;

        rows.into_iter().map(row_to_notification).collect()
    }

    async fn mark_read(
        &self,
        id: &NotificationId,
        recipient_id: &UserId,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND recipient_id = $2",
        )
        .bind(id.as_uuid())
        .bind(recipient_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark notification read", e))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::NotificationNotFound, "Notification not found")
                    .with_detail("notification_id", id.to_string()),
            );
        }

        Ok(())
    }
}

fn row_to_notification(row: PgRow) -> Result<Notification, DomainError> {
    let id: Uuid = row.get("id");
    let recipient: String = row.get("recipient_id");
    let complaint_id: Uuid = row.get("complaint_id");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    Ok(Notification {
        id: NotificationId::from_uuid(id),
        recipient_id: UserId::new(recipient)?,
        complaint_id: ComplaintId::from_uuid(complaint_id),
        title: row.get("title"),
        message: row.get("message"),
        is_read: row.get("is_read"),
        created_at: Timestamp::from_datetime(created_at),
    })
}
