//! Correlation-id middleware.
//!
//! Every request gets an id: the one sent in `X-Correlation-ID` when it
//! parses as a UUID, a fresh v4 otherwise. The id is stored in the request
//! extensions, recorded on an `http_request` span and echoed back in the
//! response header, so a client can match its request to the server log.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/api/v1/tickets", get(list_tickets))
//!     .layer(correlation_id_layer());
//! ```

use axum::{extract::Request, http::HeaderValue, http::request::Parts, response::Response};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Layer adding correlation-id tracking to every request.
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Layer for correlation ID tracking.
#[derive(Clone, Copy, Debug, Default)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

/// Middleware service for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let correlation_id = parse_header(req.headers()).unwrap_or_else(Uuid::new_v4);
        req.extensions_mut().insert(correlation_id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.instrument(span).await?;

            if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
                response.headers_mut().insert(CORRELATION_ID_HEADER, value);
            }

            Ok(response)
        })
    }
}

/// The correlation id header, if present and a valid UUID.
pub(crate) fn parse_header(headers: &axum::http::HeaderMap) -> Option<Uuid> {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
}

/// Access to the id the middleware stored in the request extensions.
pub trait CorrelationIdExt {
    /// The stored correlation id, or `None` when the layer is not installed.
    fn correlation_id(&self) -> Option<Uuid>;
}

impl CorrelationIdExt for Request {
    fn correlation_id(&self) -> Option<Uuid> {
        self.extensions().get::<Uuid>().copied()
    }
}

impl CorrelationIdExt for Parts {
    fn correlation_id(&self) -> Option<Uuid> {
        self.extensions.get::<Uuid>().copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/test", get(|| async { "ok" }))
            .route(
                "/echo",
                get(|req: Request| async move {
                    req.correlation_id().map(|id| id.to_string()).unwrap_or_default()
                }),
            )
            .layer(correlation_id_layer())
    }

    #[tokio::test]
    async fn test_correlation_id_generated_if_missing() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        let header = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("Correlation ID header should be present");
        assert!(Uuid::parse_str(header.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_correlation_id_preserved_from_request() {
        let id = Uuid::new_v4();
        let request = Request::builder()
            .uri("/test")
            .header(CORRELATION_ID_HEADER, id.to_string())
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        let echoed = response.headers().get(CORRELATION_ID_HEADER).unwrap();
        assert_eq!(echoed.to_str().unwrap(), id.to_string());
    }

    #[tokio::test]
    async fn test_handler_sees_same_id_as_response() {
        let request = Request::builder().uri("/echo").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        let header = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(body.to_vec()).unwrap(), header);
    }

    #[tokio::test]
    async fn test_invalid_uuid_generates_new() {
        let request = Request::builder()
            .uri("/test")
            .header(CORRELATION_ID_HEADER, "not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        let header = response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(Uuid::parse_str(header).is_ok());
    }
}
