//! HTTP middleware for axum.
//!
//! - `auth` - Gateway identity middleware and extractors

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, RequireAuth, USER_ID_HEADER, USER_ROLE_HEADER};
