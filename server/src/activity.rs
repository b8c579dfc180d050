//! Activity logger.
//!
//! Subscribes to the store's action broadcast and turns every reply into a
//! log line and a metric. This is the only place business metrics are
//! recorded, which keeps the reducer free of side effects.

use crate::aggregates::DeskAction;
use crate::{DeskStore, metrics};
use tokio::sync::broadcast::{Receiver, error::RecvError};
use tokio::task::JoinHandle;

/// Spawn the logger; it stops when the broadcast channel closes.
#[must_use]
pub fn spawn(store: &DeskStore) -> JoinHandle<()> {
    let rx = store.subscribe_actions();
    tokio::spawn(run(rx))
}

async fn run(mut rx: Receiver<DeskAction>) {
    loop {
        match rx.recv().await {
            Ok(action) => record(&action),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Activity logger lagged behind the store");
            }
            Err(RecvError::Closed) => {
                tracing::debug!("Action broadcast closed, activity logger stopping");
                break;
            }
        }
    }
}

/// Log and count one broadcast action.
pub fn record(action: &DeskAction) {
    let correlation_id = action.correlation_id();

    match action {
        DeskAction::UserRegistered { user, .. } => {
            tracing::info!(%correlation_id, user_id = %user.id, name = %user.name, "[USERS] User registered");
        }
        DeskAction::TicketCreated { ticket, .. } => {
            metrics::record_ticket_created();
            tracing::info!(%correlation_id, ticket = %ticket.summary(), "[TICKETS] Ticket created");
        }
        DeskAction::TicketUpdated {
            ticket,
            previous_status,
            ..
        } => {
            if let Some(previous) = previous_status {
                metrics::record_status_change(ticket.status());
                tracing::info!(
                    %correlation_id,
                    ticket_id = %ticket.id(),
                    from = %previous,
                    to = %ticket.status(),
                    assigned_to = ?ticket.assigned_to().map(|id| id.value()),
                    "[STATUS] Ticket status changed"
                );
            } else {
                tracing::info!(%correlation_id, ticket_id = %ticket.id(), "[TICKETS] Ticket updated");
            }
        }
        DeskAction::TicketDeleted { ticket_id, .. } => {
            metrics::record_ticket_deleted();
            tracing::info!(%correlation_id, %ticket_id, "[TICKETS] Ticket deleted");
        }
        DeskAction::CommentAdded { ticket_id, .. } => {
            metrics::record_comment_added();
            tracing::info!(%correlation_id, %ticket_id, "[COMMENTS] Comment added");
        }
        DeskAction::LoggedIn { user, .. } => {
            metrics::record_session_opened();
            tracing::info!(%correlation_id, user_id = %user.id, "[AUTH] Session opened");
        }
        DeskAction::LoggedOut { user_id, .. } => {
            tracing::info!(%correlation_id, user_id = ?user_id.map(|id| id.value()), "[AUTH] Session closed");
        }
        DeskAction::CommandRejected { reason, .. } => {
            metrics::record_rejection(reason);
            tracing::warn!(%correlation_id, reason = %reason, kind = reason.label(), "Command rejected");
        }
        // commands are never broadcast
        _ => tracing::trace!(%correlation_id, ?action, "Unexpected command on broadcast"),
    }
}
