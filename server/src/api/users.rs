//! User endpoints.

use super::dto::UserDto;
use super::parse_user_id;
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use ticketdesk_web::AppError;

/// `GET /api/v1/users`, ordered by id.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserDto>> {
    let users = state
        .store
        .state(|desk| desk.users.values().map(UserDto::from).collect())
        .await;
    Json(users)
}

/// `GET /api/v1/users/:id`
///
/// # Errors
///
/// 400 for a non-numeric id, 404 for an unknown user.
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserDto>, AppError> {
    let user_id = parse_user_id(&raw_id)?;

    state
        .store
        .state(|desk| desk.user(user_id).map(UserDto::from))
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found("User", user_id))
}
