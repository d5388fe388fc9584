//! In-memory user directory seeded at startup.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Role, UserId};
use crate::domain::user::UserProfile;
use crate::ports::UserDirectory;

#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, UserProfile>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserProfile>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.upsert(user);
        }
        directory
    }

    /// Adds or replaces a user.
    pub fn upsert(&self, user: UserProfile) {
        self.users
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(user.id.clone(), user);
    }

    fn poisoned() -> DomainError {
        DomainError::new(ErrorCode::InternalError, "user directory lock poisoned")
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, DomainError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<UserProfile>, DomainError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        let mut matching: Vec<_> = users.values().filter(|u| u.role == role).cloned().collect();
        matching.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(matching)
    }

    async fn count_active_workers(&self) -> Result<u64, DomainError> {
        let users = self.users.read().map_err(|_| Self::poisoned())?;
        Ok(users.values().filter(|u| u.is_assignable_worker()).count() as u64)
    }
}
