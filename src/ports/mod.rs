//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `ComplaintRepository` - atomic write primitives for clustering and transitions
//! - `ComplaintReader` - queries over complaints and their audit trail
//! - `NotificationRepository` - per-user notifications
//! - `UserDirectory` - read-only view of the identity provider's users
//!
//! ## Policies
//!
//! - `PriorityPolicy` - priority chosen at creation
//!
//! ## Events
//!
//! - `EventPublisher` / `EventSubscriber` / `EventHandler`

mod complaint_reader;
mod complaint_repository;
mod event_publisher;
mod event_subscriber;
mod notification_repository;
mod priority_policy;
mod user_directory;

pub use complaint_reader::{ComplaintReader, RepresentativeFilter};
pub use complaint_repository::ComplaintRepository;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use notification_repository::NotificationRepository;
pub use priority_policy::PriorityPolicy;
pub use user_directory::UserDirectory;
