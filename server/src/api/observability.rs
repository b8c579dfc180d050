//! Prometheus scrape endpoint.

use crate::server::state::AppState;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use ticketdesk_web::AppError;

/// `GET /metrics`
///
/// 404 when the recorder is not installed (metrics disabled, or another
/// recorder already owns the process).
#[allow(clippy::unused_async)]
pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Some(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        None => AppError::new(StatusCode::NOT_FOUND, "Metrics are disabled", "NOT_FOUND")
            .into_response(),
    }
}
