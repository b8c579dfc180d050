//! API landing endpoint.

use super::dto::ApiInfo;
use axum::Json;

/// `GET /api/v1`
#[allow(clippy::unused_async)]
pub async fn api_info() -> Json<ApiInfo> {
    Json(ApiInfo {
        name: "Ticket Management API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        description: "REST API for the help-desk ticket system",
        base_url: "/api/v1",
    })
}
