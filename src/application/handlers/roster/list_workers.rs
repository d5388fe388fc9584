//! ListWorkersHandler - active workers an admin can assign.

use std::sync::Arc;

use crate::domain::complaint::{Category, ComplaintError};
use crate::domain::foundation::{CommandMetadata, Operation, Role};
use crate::domain::user::{rank_workers_for, UserProfile};
use crate::ports::UserDirectory;

pub struct ListWorkersHandler {
    users: Arc<dyn UserDirectory>,
}

impl ListWorkersHandler {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// With a category, matching specialists are listed first.
    pub async fn handle(
        &self,
        category: Option<Category>,
        metadata: CommandMetadata,
    ) -> Result<Vec<UserProfile>, ComplaintError> {
        metadata.require(Operation::ListWorkers)?;
        let workers = self.users.list_by_role(Role::Worker).await?;
        Ok(rank_workers_for(workers, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserDirectory;
    use crate::domain::foundation::UserId;
    use crate::domain::user::Specialization;

    fn directory() -> Arc<InMemoryUserDirectory> {
        let id = |s: &str| UserId::new(s).unwrap();
        Arc::new(InMemoryUserDirectory::with_users([
            UserProfile::worker(id("w1"), "Asha", Specialization::Cleaner),
            UserProfile::worker(id("w2"), "Zed", Specialization::Electrician),
            UserProfile::worker(id("w3"), "Kim", Specialization::Plumber).deactivated(),
        ]))
    }

    #[tokio::test]
    async fn specialists_first_and_inactive_hidden() {
        let handler = ListWorkersHandler::new(directory());
        let admin = CommandMetadata::test_fixture("a1", Role::Admin);

        let workers = handler
            .handle(Some(Category::Electrical), admin)
            .await
            .unwrap();

        let names: Vec<_> = workers.iter().map(|w| w.full_name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Asha"]);
    }

    #[tokio::test]
    async fn workers_cannot_browse_the_roster() {
        let handler = ListWorkersHandler::new(directory());
        let err = handler
            .handle(None, CommandMetadata::test_fixture("w1", Role::Worker))
            .await
            .unwrap_err();
        assert!(matches!(err, ComplaintError::Forbidden(_)));
    }
}
