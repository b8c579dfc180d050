//! Session extractor.
//!
//! ```ignore
//! async fn delete_ticket(session: SessionUser) -> Result<StatusCode, AppError> {
//!     // session.user is a registered user with an open session
//! }
//! ```
//!
//! Use `Option<SessionUser>` where a session is optional.

use crate::server::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use ticketdesk_domain::User;
use ticketdesk_web::{AppError, BearerToken};

/// The user behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// Session token
    pub token: String,
    /// The authenticated user
    pub user: User,
}

impl SessionUser {
    /// Resolve a token against the desk's sessions.
    ///
    /// # Errors
    ///
    /// Returns 401 when the token is absent or unknown.
    pub async fn resolve(state: &AppState, token: &BearerToken) -> Result<Self, AppError> {
        let Some(token) = token.as_deref() else {
            return Err(AppError::unauthorized("Missing session token"));
        };

        let user = state
            .store
            .state(|desk| desk.session_user(token).cloned())
            .await
            .ok_or_else(|| AppError::unauthorized("Invalid or expired session"))?;

        Ok(Self {
            token: token.to_string(),
            user,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = BearerToken::from_headers(&parts.headers);
        Self::resolve(state, &token).await
    }
}
