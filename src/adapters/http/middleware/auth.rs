//! Identity middleware and extractors for axum.
//!
//! Authentication happens upstream. The gateway forwards the caller as two
//! headers which this layer parses into an `AuthenticatedUser`:
//!
//! ```text
//! x-user-id: resident-17
//! x-user-role: resident
//! ```
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! Requests without identity headers pass through untouched; handlers that
//! need a caller use `RequireAuth`, which rejects with 401.

use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser, CommandMetadata, Role, UserId};

use super::super::error::ErrorResponse;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Parses gateway identity headers into extensions.
///
/// Malformed identity (unknown role, blank id, only one header) is a 401.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    match identity_from_headers(request.headers()) {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => next.run(request).await,
        Err(e) => {
            tracing::debug!(error = %e, "rejected gateway identity");
            AuthRejection::InvalidIdentity(e).into_response()
        }
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<Option<&'a str>, AuthError> {
    headers
        .get(name)
        .map(|v| v.to_str().map_err(|_| AuthError::invalid(format!("{} is not ASCII", name))))
        .transpose()
}

fn identity_from_headers(headers: &HeaderMap) -> Result<Option<AuthenticatedUser>, AuthError> {
    let id = header(headers, USER_ID_HEADER)?;
    let role = header(headers, USER_ROLE_HEADER)?;

    match (id, role) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(AuthError::MissingIdentity(USER_ROLE_HEADER)),
        (None, Some(_)) => Err(AuthError::MissingIdentity(USER_ID_HEADER)),
        (Some(id), Some(role)) => {
            let id = UserId::new(id).map_err(|e| AuthError::invalid(e.to_string()))?;
            let role = role
                .parse::<Role>()
                .map_err(|e| AuthError::invalid(e.to_string()))?;
            Ok(Some(AuthenticatedUser::new(id, role)))
        }
    }
}

/// Extractor that requires an authenticated caller.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser, Option<String>);

impl RequireAuth {
    /// Command metadata for this caller, carrying the request id if one was sent.
    pub fn metadata(&self) -> CommandMetadata {
        let metadata = CommandMetadata::for_user(&self.0).with_source("api");
        match &self.1 {
            Some(request_id) => metadata.with_correlation_id(request_id.clone()),
            None => metadata,
        }
    }
}

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or(AuthRejection::Unauthenticated)?;
            let request_id = parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            Ok(RequireAuth(user, request_id))
        })
    }
}

/// Rejection type for identity failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No identity headers were forwarded.
    Unauthenticated,
    /// Identity headers were present but unusable.
    InvalidIdentity(AuthError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = match self {
            AuthRejection::Unauthenticated => {
                ErrorResponse::new("UNAUTHENTICATED", "Authentication required")
            }
            AuthRejection::InvalidIdentity(e) => ErrorResponse::new("UNAUTHORIZED", e.to_string()),
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}
