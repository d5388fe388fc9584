//! Complaint lifecycle endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ApproveComplaintRequest, CreateComplaintRequest, RejectComplaintRequest,
    ReviewComplaintRequest, TaskStatusRequest, WorkerResponse,
};
pub use routes::complaint_routes;
