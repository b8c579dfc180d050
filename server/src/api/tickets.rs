//! Ticket endpoints.
//!
//! - GET/POST /api/v1/tickets - list or open tickets
//! - GET/PUT/DELETE /api/v1/tickets/:id - read, partially update or delete
//! - GET/POST /api/v1/tickets/:id/comments - list or append comments
//! - GET/PATCH /api/v1/tickets/:id/status - allowed successors or change status
//! - PATCH /api/v1/tickets/:id/assignment - assign to a user
//! - GET /api/v1/tickets/:id/export/pdf - pseudo-PDF description export

use super::dto::{AssignmentRequest, CommentRequest, StatusUpdateRequest, TicketDto, TicketRequest};
use super::session::SessionUser;
use super::{ApiJson, parse_ticket_id, positive_user_id, unexpected_reply};
use crate::aggregates::{DeskAction, DeskState, RejectionReason};
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use ticketdesk_domain::{ContentNode, PdfTextExporter, Ticket, TicketId, TicketStatus};
use ticketdesk_web::AppError;

/// Resolve user names for a ticket returned by a command.
async fn to_dto(state: &AppState, ticket: &Ticket) -> TicketDto {
    state
        .store
        .state(|desk| TicketDto::from_ticket(ticket, desk))
        .await
}

/// Run `f` against one ticket, 404 when it does not exist.
async fn read_ticket<T, F>(state: &AppState, ticket_id: TicketId, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Ticket, &DeskState) -> T,
{
    state
        .store
        .state(|desk| desk.ticket(ticket_id).map(|ticket| f(ticket, desk)))
        .await
        .ok_or_else(|| AppError::not_found("Ticket", ticket_id))
}

/// Extract the ticket from a reply that should carry one.
fn updated_ticket(reply: DeskAction) -> Result<Ticket, AppError> {
    match reply {
        DeskAction::TicketCreated { ticket, .. } | DeskAction::TicketUpdated { ticket, .. } => {
            Ok(ticket)
        }
        _ => Err(unexpected_reply()),
    }
}

/// All tickets, ordered by id.
pub async fn list_tickets(State(state): State<AppState>) -> Json<Vec<TicketDto>> {
    let tickets = state
        .store
        .state(|desk| {
            desk.tickets
                .values()
                .map(|ticket| TicketDto::from_ticket(ticket, desk))
                .collect()
        })
        .await;
    Json(tickets)
}

/// Open a ticket.
///
/// The creator is the session user when a valid bearer token is sent, and
/// the first registered user otherwise.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/tickets \
///   -H "Content-Type: application/json" \
///   -d '{
///     "title": "Crash on login",
///     "priority": "Haute",
///     "descriptionContent": [
///       {"type": "TEXT", "data": "Crashes after three failed attempts"},
///       {"type": "IMAGE", "data": "/captures/login.png", "metadata": "Error"}
///     ]
///   }'
/// ```
///
/// # Errors
///
/// 400 `VALIDATION_ERROR` for a blank or oversized title or a blank priority.
pub async fn create_ticket(
    State(state): State<AppState>,
    session: Option<SessionUser>,
    ApiJson(request): ApiJson<TicketRequest>,
) -> Result<(StatusCode, Json<TicketDto>), AppError> {
    let description = ContentNode::from_items(&request.description_content);
    let created_by = session.map(|s| s.user.id);

    let reply = state
        .dispatch(|correlation_id| DeskAction::CreateTicket {
            correlation_id,
            title: request.title.unwrap_or_default(),
            priority: request.priority.unwrap_or_default(),
            description,
            created_by,
        })
        .await?;

    let ticket = updated_ticket(reply)?;
    Ok((StatusCode::CREATED, Json(to_dto(&state, &ticket).await)))
}

/// One ticket.
///
/// # Errors
///
/// 400 for a non-numeric id, 404 for an unknown ticket.
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<TicketDto>, AppError> {
    let ticket_id = parse_ticket_id(&raw_id)?;
    read_ticket(&state, ticket_id, TicketDto::from_ticket)
        .await
        .map(Json)
}

/// Partial update: absent fields and an empty item list are left alone.
///
/// With a session, only full-access users and the ticket's creator may edit.
///
/// # Errors
///
/// 400 for a bad id or invalid fields, 403 when the session user may not
/// edit the ticket, 404 for an unknown ticket.
pub async fn update_ticket(
    State(state): State<AppState>,
    session: Option<SessionUser>,
    Path(raw_id): Path<String>,
    ApiJson(request): ApiJson<TicketRequest>,
) -> Result<Json<TicketDto>, AppError> {
    let ticket_id = parse_ticket_id(&raw_id)?;
    let description = (!request.description_content.is_empty())
        .then(|| ContentNode::from_items(&request.description_content));

    let reply = state
        .dispatch(|correlation_id| DeskAction::UpdateTicket {
            correlation_id,
            ticket_id,
            title: request.title,
            priority: request.priority,
            description,
            requested_by: session.map(|s| s.user.id),
        })
        .await?;

    let ticket = updated_ticket(reply)?;
    Ok(Json(to_dto(&state, &ticket).await))
}

/// Delete a ticket. Requires a session allowed to delete.
///
/// # Errors
///
/// 401 without a session, 403 without the permission, 404 for an unknown
/// ticket.
pub async fn delete_ticket(
    State(state): State<AppState>,
    session: SessionUser,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let ticket_id = parse_ticket_id(&raw_id)?;

    match state
        .dispatch(|correlation_id| DeskAction::DeleteTicket {
            correlation_id,
            ticket_id,
            requested_by: session.user.id,
        })
        .await?
    {
        DeskAction::TicketDeleted { .. } => Ok(StatusCode::NO_CONTENT),
        _ => Err(unexpected_reply()),
    }
}

/// Comments in the order they were added.
///
/// # Errors
///
/// 400 for a bad id, 404 for an unknown ticket.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let ticket_id = parse_ticket_id(&raw_id)?;
    read_ticket(&state, ticket_id, |ticket, _| ticket.comments().to_vec())
        .await
        .map(Json)
}

/// Append a comment; answers 201 with the stored text.
///
/// # Errors
///
/// 400 for a bad id or blank text, 404 for an unknown ticket.
pub async fn add_comment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(request): ApiJson<CommentRequest>,
) -> Result<(StatusCode, Json<String>), AppError> {
    let ticket_id = parse_ticket_id(&raw_id)?;

    match state
        .dispatch(|correlation_id| DeskAction::AddComment {
            correlation_id,
            ticket_id,
            text: request.text.unwrap_or_default(),
        })
        .await?
    {
        DeskAction::CommentAdded { text, .. } => Ok((StatusCode::CREATED, Json(text))),
        _ => Err(unexpected_reply()),
    }
}

/// Wire names of the statuses the ticket may move to next.
///
/// # Errors
///
/// 400 for a bad id, 404 for an unknown ticket.
pub async fn allowed_transitions(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<&'static str>>, AppError> {
    let ticket_id = parse_ticket_id(&raw_id)?;
    read_ticket(&state, ticket_id, |ticket, _| {
        ticket
            .status()
            .allowed_successors()
            .iter()
            .map(|status| status.wire_name())
            .collect()
    })
    .await
    .map(Json)
}

/// Validated status change.
///
/// # Example
///
/// ```bash
/// curl -X PATCH http://localhost:8080/api/v1/tickets/1001/status \
///   -H "Content-Type: application/json" \
///   -d '{"newStatus": "ASSIGNED"}'
/// ```
///
/// # Errors
///
/// 400 `VALIDATION_ERROR` for a missing or unknown status, 400
/// `INVALID_TRANSITION` (with `from`, `to` and `allowed` details) for an
/// illegal move, 404 for an unknown ticket.
pub async fn change_status(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(request): ApiJson<StatusUpdateRequest>,
) -> Result<Json<TicketDto>, AppError> {
    let ticket_id = parse_ticket_id(&raw_id)?;
    let to = request
        .new_status
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(str::parse::<TicketStatus>)
        .transpose()
        .map_err(|error| AppError::from(RejectionReason::invalid_input(error)))?;

    let reply = state
        .dispatch(|correlation_id| DeskAction::ChangeStatus {
            correlation_id,
            ticket_id,
            to,
        })
        .await?;

    let ticket = updated_ticket(reply)?;
    Ok(Json(to_dto(&state, &ticket).await))
}

/// Assign a ticket, forcing it to `Assigned`. Requires a session allowed to
/// assign.
///
/// # Errors
///
/// 401 without a session, 403 without the permission, 400 for a bad id or a
/// non-positive `userID`, 404 for an unknown ticket or user.
pub async fn assign_ticket(
    State(state): State<AppState>,
    session: SessionUser,
    Path(raw_id): Path<String>,
    ApiJson(request): ApiJson<AssignmentRequest>,
) -> Result<Json<TicketDto>, AppError> {
    let ticket_id = parse_ticket_id(&raw_id)?;
    let user_id = positive_user_id(request.user_id)?;

    let reply = state
        .dispatch(|correlation_id| DeskAction::AssignTicket {
            correlation_id,
            ticket_id,
            user_id,
            requested_by: session.user.id,
        })
        .await?;

    let ticket = updated_ticket(reply)?;
    Ok(Json(to_dto(&state, &ticket).await))
}

/// Pseudo-PDF text export of the description.
///
/// # Errors
///
/// 400 for a bad id, 404 for an unknown ticket.
pub async fn export_pdf(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let ticket_id = parse_ticket_id(&raw_id)?;
    let body = read_ticket(&state, ticket_id, |ticket, _| ticket.export()).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        PdfTextExporter::file_name(ticket_id)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
