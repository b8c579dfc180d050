//! REST API for the help desk.
//!
//! Handlers build a [`DeskAction`](crate::DeskAction) command, dispatch it
//! through [`AppState`](crate::AppState) and map the reply onto a DTO. Reads
//! that change nothing go straight to the store's state.

pub mod auth;
pub mod dto;
pub mod home;
pub mod observability;
pub mod session;
pub mod tickets;
pub mod users;

use crate::aggregates::RejectionReason;
use axum::extract::FromRequest;
use serde_json::json;
use ticketdesk_domain::{DomainError, TicketId, UserId};
use ticketdesk_web::AppError;

/// JSON body whose rejections render as [`AppError`].
#[derive(FromRequest, Debug)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<RejectionReason> for AppError {
    fn from(reason: RejectionReason) -> Self {
        match reason {
            RejectionReason::TicketNotFound(id) => Self::not_found("Ticket", id),
            RejectionReason::UserNotFound(id) => Self::not_found("User", id),
            RejectionReason::Forbidden(permission) => {
                Self::forbidden(format!("Missing permission {permission:?}"))
            }
            RejectionReason::Validation(message) => Self::validation(message),
            RejectionReason::Domain(error) => match &error {
                DomainError::InvalidArgument(message) => Self::validation(message.clone()),
                DomainError::InvalidTransition { from, to, allowed } => {
                    Self::invalid_transition(error.to_string()).with_details(json!({
                        "from": from.wire_name(),
                        "to": to.wire_name(),
                        "allowed": allowed.iter().map(|s| s.wire_name()).collect::<Vec<_>>(),
                    }))
                }
            },
        }
    }
}

/// Parse a ticket id path segment.
///
/// # Errors
///
/// Returns a 400 `VALIDATION_ERROR` for anything but a non-negative integer.
pub fn parse_ticket_id(raw: &str) -> Result<TicketId, AppError> {
    raw.trim()
        .parse()
        .map(TicketId::new)
        .map_err(|_| AppError::validation(format!("Invalid ticket id: {raw}")))
}

/// Parse a user id path segment.
///
/// # Errors
///
/// Returns a 400 `VALIDATION_ERROR` for anything but a non-negative integer.
pub fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
    raw.trim()
        .parse()
        .map(UserId::new)
        .map_err(|_| AppError::validation(format!("Invalid user id: {raw}")))
}

/// Convert a `userID` body field, which must be strictly positive.
///
/// # Errors
///
/// Returns a 400 `VALIDATION_ERROR` for zero, negative or oversized values.
pub fn positive_user_id(raw: i64) -> Result<UserId, AppError> {
    u32::try_from(raw)
        .ok()
        .filter(|id| *id > 0)
        .map(UserId::new)
        .ok_or_else(|| AppError::validation(format!("Invalid user id: {raw}")))
}

/// Error for a reply that does not match the command sent.
pub(crate) fn unexpected_reply() -> AppError {
    AppError::internal("Unexpected reply from the desk")
}
