//! User directory port.
//!
//! Users are managed by the identity provider; the desk only reads them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::UserProfile;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Users among `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, DomainError>;

    /// All users with `role`, active or not.
    async fn list_by_role(&self, role: Role) -> Result<Vec<UserProfile>, DomainError>;

    async fn count_active_workers(&self) -> Result<u64, DomainError>;
}
