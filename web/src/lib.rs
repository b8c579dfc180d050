//! Axum integration for ticketdesk.
//!
//! The HTTP layer is the imperative shell around the store:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, bearer tokens
//! │  - Request parsing                      │  ← correlation ids, tracing
//! │  - Response serialization               │  ← error mapping
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - Reducer owning the help-desk state   │  ← atomic find + mutate
//! │  - Ticket domain model                  │  ← no I/O, no logging
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** path, JSON body, bearer token and correlation id
//! 3. **Build** a command tagged with the correlation id
//! 4. **Dispatch** it with `Store::send_and_wait_for`
//! 5. **Map** the reply (or rejection) to an HTTP response

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{BearerToken, CorrelationId};
pub use middleware::{CORRELATION_ID_HEADER, CorrelationIdExt, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
