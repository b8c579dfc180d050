//! Custom Axum extractors.
//!
//! - [`CorrelationId`]: the request's correlation id
//! - [`BearerToken`]: the session token from the `Authorization` header
//!
//! ```ignore
//! async fn handler(
//!     State(app): State<AppState>,
//!     correlation_id: CorrelationId,
//!     BearerToken(token): BearerToken,
//! ) -> Result<Json<Response>, AppError> {
//!     tracing::info!(correlation_id = %correlation_id.0, "Processing request");
//!     Ok(Json(response))
//! }
//! ```

use crate::middleware::{CorrelationIdExt, parse_header};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use std::convert::Infallible;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Prefers the id stored by [`correlation_id_layer`](crate::correlation_id_layer),
/// then the `X-Correlation-ID` header, then a fresh UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .correlation_id()
            .or_else(|| parse_header(&parts.headers))
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(id))
    }
}

/// Session token from `Authorization`.
///
/// Both `Bearer <token>` and a bare token are accepted. Missing or blank
/// headers yield `None`; whether that is an error is up to the handler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    /// Parse the token out of request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|raw| {
                let raw = raw.trim_start();
                raw.strip_prefix("Bearer ").unwrap_or(raw).trim()
            })
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self(token)
    }

    /// Borrow the token.
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<(&str, &str)>) -> Parts {
        let mut builder = Request::builder();
        if let Some((name, value)) = header {
            builder = builder.header(name, value);
        }
        builder.body(()).expect("Valid request").into_parts().0
    }

    #[tokio::test]
    async fn test_correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let mut parts = parts_with(Some(("X-Correlation-ID", &uuid.to_string())));

        let id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(id.0, uuid);
    }

    #[tokio::test]
    async fn test_correlation_id_prefers_extension() {
        let stored = Uuid::new_v4();
        let mut parts = parts_with(Some(("X-Correlation-ID", &Uuid::new_v4().to_string())));
        parts.extensions.insert(stored);

        let id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(id.0, stored);
    }

    #[tokio::test]
    async fn test_correlation_id_generates_new() {
        let mut parts = parts_with(None);
        let id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_ne!(id.0, Uuid::nil());
    }

    #[tokio::test]
    async fn test_bearer_prefix_is_optional() {
        let mut parts = parts_with(Some(("Authorization", "Bearer session_abc")));
        let token = BearerToken::from_request_parts(&mut parts, &()).await.expect("Should extract");
        assert_eq!(token.as_deref(), Some("session_abc"));

        let mut parts = parts_with(Some(("Authorization", "session_abc")));
        let token = BearerToken::from_request_parts(&mut parts, &()).await.expect("Should extract");
        assert_eq!(token.as_deref(), Some("session_abc"));
    }

    #[tokio::test]
    async fn test_missing_or_blank_token_is_none() {
        let mut parts = parts_with(None);
        let token = BearerToken::from_request_parts(&mut parts, &()).await.expect("Should extract");
        assert_eq!(token, BearerToken(None));

        let mut parts = parts_with(Some(("Authorization", "Bearer   ")));
        let token = BearerToken::from_request_parts(&mut parts, &()).await.expect("Should extract");
        assert_eq!(token, BearerToken(None));
    }
}
