//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::application::handlers::{
    ApproveComplaintHandler, CreateComplaintHandler, GetAnalyticsHandler,
    GetComplaintHistoryHandler, ListAdminComplaintsHandler, ListNotificationsHandler,
    ListResidentComplaintsHandler, ListWorkerTasksHandler, ListWorkersHandler,
    MarkNotificationReadHandler, RejectComplaintHandler, ReviewComplaintHandler, StartWorkHandler,
    TransitionExecutor, UpdateTaskStatusHandler,
};
use crate::application::handlers::complaint::DEFAULT_CLUSTER_ATTEMPTS;
use crate::ports::{
    ComplaintReader, ComplaintRepository, EventPublisher, NotificationRepository, PriorityPolicy,
    UserDirectory,
};

/// Arc-wrapped ports, cloned per request. Handlers are built on demand.
#[derive(Clone)]
pub struct AppState {
    pub complaint_repository: Arc<dyn ComplaintRepository>,
    pub complaint_reader: Arc<dyn ComplaintReader>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub notification_repository: Arc<dyn NotificationRepository>,
    pub priority_policy: Arc<dyn PriorityPolicy>,
    pub event_publisher: Arc<dyn EventPublisher>,
    transition_executor: Arc<TransitionExecutor>,
    cluster_attempts: u32,
}

impl AppState {
    pub fn new(
        complaint_repository: Arc<dyn ComplaintRepository>,
        complaint_reader: Arc<dyn ComplaintReader>,
        user_directory: Arc<dyn UserDirectory>,
        notification_repository: Arc<dyn NotificationRepository>,
        priority_policy: Arc<dyn PriorityPolicy>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        let transition_executor = Arc::new(TransitionExecutor::new(
            complaint_repository.clone(),
            event_publisher.clone(),
        ));
        Self {
            complaint_repository,
            complaint_reader,
            user_directory,
            notification_repository,
            priority_policy,
            event_publisher,
            transition_executor,
            cluster_attempts: DEFAULT_CLUSTER_ATTEMPTS,
        }
    }

    /// Overrides the optimistic retry bounds.
    pub fn with_retry_limits(mut self, transition_attempts: u32, cluster_attempts: u32) -> Self {
        self.transition_executor = Arc::new(
            TransitionExecutor::new(self.complaint_repository.clone(), self.event_publisher.clone())
                .with_max_attempts(transition_attempts),
        );
        self.cluster_attempts = cluster_attempts.max(1);
        self
    }

    pub fn create_complaint_handler(&self) -> CreateComplaintHandler {
        CreateComplaintHandler::new(
            self.complaint_repository.clone(),
            self.complaint_reader.clone(),
            self.priority_policy.clone(),
            self.event_publisher.clone(),
        )
        .with_max_attempts(self.cluster_attempts)
    }

    pub fn list_resident_complaints_handler(&self) -> ListResidentComplaintsHandler {
        ListResidentComplaintsHandler::new(self.complaint_reader.clone())
    }

    pub fn list_admin_complaints_handler(&self) -> ListAdminComplaintsHandler {
        ListAdminComplaintsHandler::new(
            self.complaint_reader.clone(),
            self.user_directory.clone(),
        )
    }

    pub fn list_worker_tasks_handler(&self) -> ListWorkerTasksHandler {
        ListWorkerTasksHandler::new(
            self.complaint_reader.clone(),
            self.user_directory.clone(),
        )
    }

    pub fn approve_complaint_handler(&self) -> ApproveComplaintHandler {
        ApproveComplaintHandler::new(
            self.transition_executor.clone(),
            self.user_directory.clone(),
        )
    }

    pub fn reject_complaint_handler(&self) -> RejectComplaintHandler {
        RejectComplaintHandler::new(self.transition_executor.clone())
    }

    pub fn review_complaint_handler(&self) -> ReviewComplaintHandler {
        ReviewComplaintHandler::new(self.transition_executor.clone())
    }

    pub fn start_work_handler(&self) -> StartWorkHandler {
        StartWorkHandler::new(self.transition_executor.clone())
    }

    pub fn update_task_status_handler(&self) -> UpdateTaskStatusHandler {
        UpdateTaskStatusHandler::new(self.transition_executor.clone())
    }

    pub fn complaint_history_handler(&self) -> GetComplaintHistoryHandler {
        GetComplaintHistoryHandler::new(
            self.complaint_repository.clone(),
            self.complaint_reader.clone(),
        )
    }

    pub fn list_workers_handler(&self) -> ListWorkersHandler {
        ListWorkersHandler::new(self.user_directory.clone())
    }

    pub fn analytics_handler(&self) -> GetAnalyticsHandler {
        GetAnalyticsHandler::new(self.complaint_reader.clone(), self.user_directory.clone())
    }

    pub fn list_notifications_handler(&self) -> ListNotificationsHandler {
        ListNotificationsHandler::new(self.notification_repository.clone())
    }

    pub fn mark_notification_read_handler(&self) -> MarkNotificationReadHandler {
        MarkNotificationReadHandler::new(self.notification_repository.clone())
    }
}
