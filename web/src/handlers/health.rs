//! Health check endpoints.
//!
//! `/health` is liveness only. `/ready` reports the store: 503 once it is
//! shutting down, so load balancers drain the instance.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::collections::BTreeMap;
use ticketdesk_core::reducer::Reducer;
use ticketdesk_runtime::{HealthCheck, HealthStatus, Store};

/// Liveness probe.
///
/// ```text
/// GET /health  ->  200 "ok"
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// JSON body of the readiness probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    /// Component name
    pub component: String,
    /// `healthy`, `degraded` or `unhealthy`
    pub status: String,
    /// Optional detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Extra key/value details
    pub metadata: BTreeMap<String, String>,
}

impl From<HealthCheck> for HealthResponse {
    fn from(check: HealthCheck) -> Self {
        Self {
            component: check.component,
            status: check.status.to_string(),
            message: check.message,
            metadata: check.metadata.into_iter().collect(),
        }
    }
}

/// HTTP status for a health level; degraded still serves traffic.
#[must_use]
pub const fn status_code(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Readiness probe backed by [`Store::health`].
///
/// ```text
/// GET /ready
///
/// {
///   "component": "store",
///   "status": "healthy",
///   "metadata": { "observers": "1", "pending_effects": "0" }
/// }
/// ```
#[allow(clippy::unused_async)]
pub async fn readiness<S, A, E, R>(
    State(store): State<Store<S, A, E, R>>,
) -> (StatusCode, Json<HealthResponse>)
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Send + Clone + std::fmt::Debug + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    let health = store.health();
    (status_code(health.status), Json(health.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use ticketdesk_core::{SmallVec, effect::Effect};

    #[derive(Clone)]
    struct NoopReducer;

    #[derive(Clone, Debug)]
    struct Ping;

    impl Reducer for NoopReducer {
        type State = ();
        type Action = Ping;
        type Environment = ();

        fn reduce(&self, _state: &mut (), _action: Ping, _env: &()) -> SmallVec<[Effect<Ping>; 4]> {
            SmallVec::new()
        }
    }

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, body) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_readiness_healthy_store() {
        let store = Store::new((), NoopReducer, ());

        let (status, Json(body)) = readiness(State(store)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "healthy");
        assert_eq!(body.metadata.get("pending_effects").map(String::as_str), Some("0"));
    }

    #[tokio::test]
    async fn test_readiness_after_shutdown() {
        let store = Store::new((), NoopReducer, ());
        assert!(store.shutdown(Duration::from_millis(100)).await.is_ok());

        let (status, Json(body)) = readiness(State(store)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "unhealthy");
        assert!(body.message.is_some());
    }
}
