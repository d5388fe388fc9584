//! ListAdminComplaintsHandler - representatives for the admin queue.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::complaint::{ComplaintError, ComplaintStatus, ComplaintView};
use crate::domain::foundation::{CommandMetadata, Operation, ValidationError};
use crate::ports::{ComplaintReader, RepresentativeFilter, UserDirectory};

use super::listing::{attach_people, ComplaintListing, People};

/// Which representatives to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminFilter {
    #[default]
    All,
    Status(ComplaintStatus),
    /// Work waiting for an admin verdict.
    Review,
}

impl AdminFilter {
    fn to_filter(self) -> RepresentativeFilter {
        match self {
            AdminFilter::All => RepresentativeFilter::all(),
            AdminFilter::Status(status) => RepresentativeFilter::with_status(status),
            AdminFilter::Review => {
                RepresentativeFilter::with_status(ComplaintStatus::AwaitingReview)
            }
        }
    }
}

impl FromStr for AdminFilter {
    type Err = ValidationError;

    /// Accepts `all`, `review`, or a status wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(AdminFilter::All),
            "review" => Ok(AdminFilter::Review),
            other => other.parse().map(AdminFilter::Status),
        }
    }
}

pub struct ListAdminComplaintsHandler {
    reader: Arc<dyn ComplaintReader>,
    users: Arc<dyn UserDirectory>,
}

impl ListAdminComplaintsHandler {
    pub fn new(reader: Arc<dyn ComplaintReader>, users: Arc<dyn UserDirectory>) -> Self {
        Self { reader, users }
    }

    /// Rows name the reporter and the assigned worker.
    pub async fn handle(
        &self,
        filter: AdminFilter,
        metadata: CommandMetadata,
    ) -> Result<Vec<ComplaintListing>, ComplaintError> {
        metadata.require(Operation::ListAllComplaints)?;
        let reps = self.reader.list_representatives(&filter.to_filter()).await?;
        let views = reps
            .iter()
            .map(|c| ComplaintView::of_representative(c).map_err(ComplaintError::from))
            .collect::<Result<Vec<_>, _>>()?;
        attach_people(self.users.as_ref(), views, People::ReporterAndAssignee).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryComplaintStore, InMemoryUserDirectory};
    use crate::domain::complaint::{
        Category, ComplaintDraft, ComplaintType, Priority, Transition,
    };
    use crate::domain::foundation::{Role, Timestamp, UserId};
    use crate::domain::user::{Specialization, UserProfile};
    use crate::ports::ComplaintRepository;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn directory() -> Arc<InMemoryUserDirectory> {
        Arc::new(InMemoryUserDirectory::with_users([
            UserProfile::resident(uid("r1"), "Rina", "2", "201").with_email("rina@example.org"),
            UserProfile::worker(uid("w1"), "Ben Ito", Specialization::Electrician),
        ]))
    }

    #[test]
    fn parses_filter_names() {
        assert_eq!("all".parse::<AdminFilter>().unwrap(), AdminFilter::All);
        assert_eq!("review".parse::<AdminFilter>().unwrap(), AdminFilter::Review);
        assert_eq!(
            "In Progress".parse::<AdminFilter>().unwrap(),
            AdminFilter::Status(ComplaintStatus::InProgress)
        );
        assert!("archived".parse::<AdminFilter>().is_err());
    }

    #[tokio::test]
    async fn lists_representatives_only() {
        let store = Arc::new(InMemoryComplaintStore::new());
        let draft = |author: &str| {
            ComplaintDraft::new(
                UserId::new(author).unwrap(),
                ComplaintType::CommonArea,
                "2",
                None,
                Category::Electrical,
                "Light not working",
                None,
                None,
            )
            .unwrap()
        };
        let rep = draft("r1").into_representative(Priority::Low, Timestamp::now());
        store.insert_representative(&rep).await.unwrap();
        store
            .attach_duplicate(&draft("r2").into_duplicate(*rep.id(), Priority::Low, Timestamp::now()))
            .await
            .unwrap();

        let handler = ListAdminComplaintsHandler::new(store, directory());
        let admin = CommandMetadata::test_fixture("a1", Role::Admin);

        let all = handler.handle(AdminFilter::All, admin.clone()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].complaint.count, 2);
        assert_eq!(all[0].complaint.author_id.as_str(), "r1");

        let review = handler.handle(AdminFilter::Review, admin).await.unwrap();
        assert!(review.is_empty());
    }

    #[tokio::test]
    async fn residents_are_forbidden() {
        let handler =
            ListAdminComplaintsHandler::new(Arc::new(InMemoryComplaintStore::new()), directory());
        let err = handler
            .handle(AdminFilter::All, CommandMetadata::test_fixture("r1", Role::Resident))
            .await
            .unwrap_err();
        assert!(matches!(err, ComplaintError::Forbidden(_)));
    }

    #[tokio::test]
    async fn rows_name_reporter_and_assigned_worker() {
        let store = Arc::new(InMemoryComplaintStore::new());
        let mut rep = ComplaintDraft::new(
            uid("r1"),
            ComplaintType::CommonArea,
            "2",
            None,
            Category::Electrical,
            "Fan not working",
            None,
            None,
        )
        .unwrap()
        .into_representative(Priority::Low, Timestamp::now());
        store.insert_representative(&rep).await.unwrap();
        let record = rep
            .apply(
                Transition::Approve { worker_id: uid("w1") },
                &uid("a1"),
                Role::Admin,
                None,
                Timestamp::now(),
            )
            .unwrap();
        store.apply_transition(&rep, 1, &record).await.unwrap();

        let rows = ListAdminComplaintsHandler::new(store, directory())
            .handle(AdminFilter::All, CommandMetadata::test_fixture("a1", Role::Admin))
            .await
            .unwrap();

        let reporter = rows[0].reporter.as_ref().unwrap();
        assert_eq!(reporter.full_name, "Rina");
        assert_eq!(reporter.email.as_deref(), Some("rina@example.org"));
        let assignee = rows[0].assignee.as_ref().unwrap();
        assert_eq!(assignee.full_name, "Ben Ito");
        assert_eq!(assignee.specialization, Some(Specialization::Electrician));
    }
}
