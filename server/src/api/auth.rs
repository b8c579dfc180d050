//! Session endpoints.
//!
//! - POST /api/v1/auth/login - open a session for a registered user
//! - GET /api/v1/auth/session - the user behind the bearer token
//! - POST /api/v1/auth/logout - drop the bearer token's session

use super::dto::{AuthResponse, LoginRequest, UserDto};
use super::session::SessionUser;
use super::{ApiJson, positive_user_id, unexpected_reply};
use crate::aggregates::{DeskAction, RejectionReason};
use crate::server::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use ticketdesk_web::{AppError, BearerToken};

/// Open a session.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"userID": 1}'
/// ```
///
/// # Errors
///
/// 400 for a non-positive id, 401 for an unknown user.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user_id = positive_user_id(request.user_id)?;

    match state
        .send_command(|correlation_id| DeskAction::Login {
            correlation_id,
            user_id,
        })
        .await?
    {
        DeskAction::LoggedIn { token, user, .. } => Ok(Json(AuthResponse {
            token,
            user: UserDto::from(&user),
        })),
        DeskAction::CommandRejected {
            reason: RejectionReason::UserNotFound(_),
            ..
        } => Err(AppError::unauthorized("User not found")),
        DeskAction::CommandRejected { reason, .. } => Err(reason.into()),
        _ => Err(unexpected_reply()),
    }
}

/// The user behind the bearer token; 401 when it is missing or unknown.
#[allow(clippy::unused_async)]
pub async fn session(session: SessionUser) -> Json<UserDto> {
    Json(UserDto::from(&session.user))
}

/// Drop the bearer token's session, if any. Always 204.
///
/// # Errors
///
/// Only store failures.
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, AppError> {
    if let Some(token) = token {
        state
            .dispatch(|correlation_id| DeskAction::Logout {
                correlation_id,
                token,
            })
            .await?;
    }

    Ok(StatusCode::NO_CONTENT)
}
