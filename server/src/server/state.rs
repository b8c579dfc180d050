//! Application state for the help-desk HTTP server.

use crate::DeskStore;
use crate::aggregates::DeskAction;
use axum::extract::FromRef;
use std::time::Duration;
use ticketdesk_runtime::metrics::MetricsExporter;
use ticketdesk_web::AppError;
use uuid::Uuid;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// The store owning tickets, users and sessions
    pub store: DeskStore,
    /// Maximum wait for a command reply
    pub request_timeout: Duration,
    /// Prometheus exporter backing `/metrics`
    pub metrics: MetricsExporter,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(store: DeskStore, request_timeout: Duration, metrics: MetricsExporter) -> Self {
        Self {
            store,
            request_timeout,
            metrics,
        }
    }

    /// Send a command and return its reply, rejections included.
    ///
    /// `command` receives a fresh correlation id to embed in the action.
    ///
    /// # Errors
    ///
    /// Returns a 503/408 [`AppError`] if the store is shutting down or the
    /// reply does not arrive within the request timeout.
    pub async fn send_command<F>(&self, command: F) -> Result<DeskAction, AppError>
    where
        F: FnOnce(Uuid) -> DeskAction,
    {
        let correlation_id = Uuid::new_v4();
        let action = command(correlation_id);
        tracing::debug!(%correlation_id, ?action, "Dispatching command");

        let reply = self
            .store
            .send_and_wait_for(
                action,
                |a| a.is_reply_to(correlation_id),
                self.request_timeout,
            )
            .await?;

        Ok(reply)
    }

    /// Send a command and return its successful reply.
    ///
    /// # Errors
    ///
    /// Returns the [`AppError`] matching the rejection reason, or the store
    /// failure from [`AppState::send_command`].
    pub async fn dispatch<F>(&self, command: F) -> Result<DeskAction, AppError>
    where
        F: FnOnce(Uuid) -> DeskAction,
    {
        match self.send_command(command).await? {
            DeskAction::CommandRejected { reason, .. } => Err(reason.into()),
            reply => Ok(reply),
        }
    }
}

impl FromRef<AppState> for DeskStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}
