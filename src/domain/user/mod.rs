//! Directory users as seen by the grievance desk.
//!
//! Users are owned by the identity provider; this module only reads them to
//! validate assignments and to rank workers for a category.

mod profile;
mod specialization;

pub use profile::{rank_workers_for, UserProfile};
pub use specialization::Specialization;
