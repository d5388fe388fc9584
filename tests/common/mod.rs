//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use grievance_desk::adapters::{
    FixedPriorityPolicy, InMemoryComplaintStore, InMemoryEventBus, InMemoryNotificationStore,
    InMemoryUserDirectory,
};
use grievance_desk::application::handlers::{
    ApproveComplaintCommand, ApproveComplaintHandler, CreateComplaintCommand,
    CreateComplaintHandler, NotificationProjector, RejectComplaintCommand, RejectComplaintHandler,
    ReviewAction, ReviewComplaintCommand, ReviewComplaintHandler, StartWorkCommand,
    StartWorkHandler, TransitionExecutor, UpdateTaskStatusCommand, UpdateTaskStatusHandler,
    PROJECTED_EVENTS,
};
use grievance_desk::domain::complaint::{
    Category, Complaint, ComplaintError, ComplaintType, ComplaintView, WorkOutcome,
};
use grievance_desk::domain::foundation::{CommandMetadata, ComplaintId, Role, UserId};
use grievance_desk::domain::user::{Specialization, UserProfile};
use grievance_desk::ports::{ComplaintReader, ComplaintRepository, EventSubscriber};

pub fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

pub fn resident(id: &str) -> CommandMetadata {
    CommandMetadata::new(uid(id), Role::Resident).with_source("test")
}

pub fn admin() -> CommandMetadata {
    CommandMetadata::new(uid("admin-1"), Role::Admin).with_source("test")
}

pub fn worker(id: &str) -> CommandMetadata {
    CommandMetadata::new(uid(id), Role::Worker).with_source("test")
}

/// Common-area leak on floor 3.
pub fn leak() -> CreateComplaintCommand {
    CreateComplaintCommand {
        complaint_type: ComplaintType::CommonArea,
        floor: "3".to_string(),
        room: None,
        category: Category::Plumbing,
        subcategory: "Leaking tap".to_string(),
        description: Some("Tap by the lift".to_string()),
        media_url: None,
    }
}

/// Personal-room leak in `room` on floor 3.
pub fn room_leak(room: &str) -> CreateComplaintCommand {
    CreateComplaintCommand {
        complaint_type: ComplaintType::PersonalRoom,
        room: Some(room.to_string()),
        ..leak()
    }
}

/// In-memory deployment wired the way the server wires it.
pub struct Desk {
    pub store: Arc<InMemoryComplaintStore>,
    pub users: Arc<InMemoryUserDirectory>,
    pub notes: Arc<InMemoryNotificationStore>,
    pub bus: Arc<InMemoryEventBus>,
    pub executor: Arc<TransitionExecutor>,
}

impl Desk {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryComplaintStore::new());
        let users = Arc::new(InMemoryUserDirectory::with_users([
            UserProfile::admin(uid("admin-1"), "Admin One"),
            UserProfile::worker(uid("worker-1"), "Asha Rao", Specialization::Plumber),
            UserProfile::worker(uid("worker-2"), "Ben Ito", Specialization::Electrician),
            UserProfile::resident(uid("resident-a"), "Ana", "3", "301"),
            UserProfile::resident(uid("resident-b"), "Bo", "3", "302"),
        ]));
        let notes = Arc::new(InMemoryNotificationStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        bus.subscribe_all(
            &PROJECTED_EVENTS,
            Arc::new(NotificationProjector::new(
                store.clone(),
                store.clone(),
                users.clone(),
                notes.clone(),
            )),
        );
        let executor = Arc::new(TransitionExecutor::new(store.clone(), bus.clone()));
        Self {
            store,
            users,
            notes,
            bus,
            executor,
        }
    }

    pub fn create_handler(&self) -> CreateComplaintHandler {
        CreateComplaintHandler::new(
            self.store.clone(),
            self.store.clone(),
            Arc::new(FixedPriorityPolicy::default()),
            self.bus.clone(),
        )
    }

    pub async fn submit(&self, author: &str, cmd: CreateComplaintCommand) -> ComplaintView {
        self.create_handler()
            .handle(cmd, resident(author))
            .await
            .unwrap()
    }

    pub async fn approve(&self, id: ComplaintId, worker_id: &str) -> Result<ComplaintView, ComplaintError> {
        ApproveComplaintHandler::new(self.executor.clone(), self.users.clone())
            .handle(
                ApproveComplaintCommand {
                    complaint_id: id,
                    worker_id: uid(worker_id),
                    expected_status: None,
                },
                admin(),
            )
            .await
    }

    pub async fn reject(&self, id: ComplaintId, reason: &str) -> Result<ComplaintView, ComplaintError> {
        RejectComplaintHandler::new(self.executor.clone())
            .handle(
                RejectComplaintCommand {
                    complaint_id: id,
                    reason: reason.to_string(),
                    expected_status: None,
                },
                admin(),
            )
            .await
    }

    pub async fn start(&self, id: ComplaintId, worker_id: &str) -> Result<ComplaintView, ComplaintError> {
        StartWorkHandler::new(self.executor.clone())
            .handle(
                StartWorkCommand {
                    complaint_id: id,
                    expected_status: None,
                },
                worker(worker_id),
            )
            .await
    }

    pub async fn resolve(
        &self,
        id: ComplaintId,
        worker_id: &str,
        outcome: WorkOutcome,
        resolution: &str,
    ) -> Result<ComplaintView, ComplaintError> {
        UpdateTaskStatusHandler::new(self.executor.clone())
            .handle(
                UpdateTaskStatusCommand {
                    complaint_id: id,
                    outcome,
                    resolution: resolution.to_string(),
                    proof_media: None,
                    expected_status: None,
                },
                worker(worker_id),
            )
            .await
    }

    pub async fn review(&self, id: ComplaintId, action: ReviewAction) -> Result<ComplaintView, ComplaintError> {
        ReviewComplaintHandler::new(self.executor.clone())
            .handle(
                ReviewComplaintCommand {
                    complaint_id: id,
                    action,
                    expected_status: None,
                },
                admin(),
            )
            .await
    }

    pub async fn load(&self, id: ComplaintId) -> Complaint {
        self.store.find_by_id(&id).await.unwrap().unwrap()
    }

    pub async fn duplicates_of(&self, id: ComplaintId) -> Vec<Complaint> {
        self.store.list_duplicates(&id).await.unwrap()
    }

    pub fn all(&self) -> Vec<Complaint> {
        self.store.all().unwrap()
    }
}
