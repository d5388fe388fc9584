//! Fixtures shared by the complaint handler tests.

use std::sync::Arc;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::{InMemoryComplaintStore, InMemoryUserDirectory};
use crate::domain::complaint::{Category, Complaint, ComplaintDraft, ComplaintType, Priority};
use crate::domain::foundation::{CommandMetadata, ComplaintId, Role, Timestamp, UserId};
use crate::domain::user::{Specialization, UserProfile};
use crate::ports::ComplaintRepository;

use super::TransitionExecutor;

pub(crate) struct World {
    pub store: Arc<InMemoryComplaintStore>,
    pub users: Arc<InMemoryUserDirectory>,
    pub bus: Arc<InMemoryEventBus>,
    pub executor: Arc<TransitionExecutor>,
}

impl World {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryComplaintStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let users = Arc::new(InMemoryUserDirectory::with_users([
            UserProfile::admin(uid("admin-1"), "Admin One"),
            UserProfile::worker(uid("worker-1"), "Asha Rao", Specialization::Plumber),
            UserProfile::worker(uid("worker-2"), "Ben Ito", Specialization::Electrician),
            UserProfile::worker(uid("retired"), "Old Hand", Specialization::Cleaner).deactivated(),
            UserProfile::resident(uid("resident-1"), "Rina", "3", "301"),
        ]));
        let executor = Arc::new(TransitionExecutor::new(store.clone(), bus.clone()));
        Self {
            store,
            users,
            bus,
            executor,
        }
    }

    /// Persists a fresh common-area representative and returns its id.
    pub async fn pending(&self, author: &str) -> ComplaintId {
        let rep = draft(author).into_representative(Priority::Low, Timestamp::now());
        self.store.insert_representative(&rep).await.unwrap();
        *rep.id()
    }

    /// Attaches a duplicate of the same cluster to `rep_id`.
    pub async fn duplicate_of(&self, rep_id: ComplaintId, author: &str) -> ComplaintId {
        let dup = draft(author).into_duplicate(rep_id, Priority::Low, Timestamp::now());
        self.store.attach_duplicate(&dup).await.unwrap();
        *dup.id()
    }

    pub async fn load(&self, id: ComplaintId) -> Complaint {
        self.store.find_by_id(&id).await.unwrap().unwrap()
    }
}

pub(crate) fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

pub(crate) fn admin() -> CommandMetadata {
    CommandMetadata::test_fixture("admin-1", Role::Admin)
}

pub(crate) fn worker(id: &str) -> CommandMetadata {
    CommandMetadata::test_fixture(id, Role::Worker)
}

pub(crate) fn resident(id: &str) -> CommandMetadata {
    CommandMetadata::test_fixture(id, Role::Resident)
}

fn draft(author: &str) -> ComplaintDraft {
    ComplaintDraft::new(
        uid(author),
        ComplaintType::CommonArea,
        "3",
        None,
        Category::Plumbing,
        "Leaking tap",
        None,
        None,
    )
    .unwrap()
}
