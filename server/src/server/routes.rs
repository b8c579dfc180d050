//! Router configuration for the help desk.

use super::state::AppState;
use crate::api::{auth, home, observability, tickets, users};
use crate::{DeskAction, DeskEnvironment, DeskReducer, DeskState};
use axum::{
    Router,
    routing::{get, patch, post},
};
use ticketdesk_web::correlation_id_layer;
use ticketdesk_web::handlers::health::{health_check, readiness};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// # Routes
///
/// - `GET /api/v1` - API information
/// - `POST /api/v1/auth/login`, `GET /api/v1/auth/session`, `POST /api/v1/auth/logout`
/// - `GET /api/v1/users`, `GET /api/v1/users/:id`
/// - `GET|POST /api/v1/tickets`
/// - `GET|PUT|DELETE /api/v1/tickets/:id`
/// - `GET|POST /api/v1/tickets/:id/comments`
/// - `GET|PATCH /api/v1/tickets/:id/status`
/// - `PATCH /api/v1/tickets/:id/assignment`
/// - `GET /api/v1/tickets/:id/export/pdf`
/// - `GET /health`, `GET /ready`, `GET /metrics`
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/", get(home::api_info))
        // Sessions
        .route("/auth/login", post(auth::login))
        .route("/auth/session", get(auth::session))
        .route("/auth/logout", post(auth::logout))
        // Users
        .route("/users", get(users::list_users))
        .route("/users/:id", get(users::get_user))
        // Tickets
        .route(
            "/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route(
            "/tickets/:id",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route(
            "/tickets/:id/comments",
            get(tickets::list_comments).post(tickets::add_comment),
        )
        .route(
            "/tickets/:id/status",
            get(tickets::allowed_transitions).patch(tickets::change_status),
        )
        .route("/tickets/:id/assignment", patch(tickets::assign_ticket))
        .route("/tickets/:id/export/pdf", get(tickets::export_pdf));

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/ready",
            get(readiness::<DeskState, DeskAction, DeskEnvironment, DeskReducer>),
        )
        .route("/metrics", get(observability::metrics))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
