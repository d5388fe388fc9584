//! Complaint domain module.
//!
//! Owns the complaint aggregate, its lifecycle state machine and the
//! read-through view used by every listing.
//!
//! # Events
//!
//! - `ComplaintSubmitted` - a resident filed a complaint
//! - `ComplaintTransitioned` - an admin or worker moved a representative

mod aggregate;
mod errors;
mod events;
mod status;
mod transition;
mod values;
mod view;

pub use aggregate::{Complaint, ComplaintDraft, Lifecycle, Membership, MAX_MEDIA_URL_LENGTH};
pub use errors::ComplaintError;
pub use events::{ComplaintSubmitted, ComplaintTransitioned};
pub use status::ComplaintStatus;
pub use transition::{Transition, TransitionAction, TransitionRecord};
pub use values::{
    Category, ComplaintType, Priority, Subcategory, WorkOutcome, MAX_DESCRIPTION_LENGTH,
    MAX_LOCATION_LENGTH,
};
pub use view::ComplaintView;
