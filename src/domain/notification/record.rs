use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ComplaintId, NotificationId, Timestamp, UserId};

/// A message for one user about one complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub complaint_id: ComplaintId,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl Notification {
    pub fn new(
        recipient_id: UserId,
        complaint_id: ComplaintId,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient_id,
            complaint_id,
            title: title.into(),
            message: message.into(),
            is_read: false,
            created_at,
        }
    }

    pub fn is_for(&self, user_id: &UserId) -> bool {
        &self.recipient_id == user_id
    }
}
