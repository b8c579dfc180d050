//! Domain error taxonomy.

use crate::status::TicketStatus;
use thiserror::Error;

/// Errors raised by domain operations
///
/// Both variants are caller errors: nothing here is transient and nothing is
/// retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested status change is not in the transition table
    #[error(
        "Invalid transition: {from} -> {to}. Allowed transitions: {}",
        describe_allowed(.allowed)
    )]
    InvalidTransition {
        /// Status the ticket was in
        from: TicketStatus,
        /// Status that was requested
        to: TicketStatus,
        /// Legal successors of `from`
        allowed: Vec<TicketStatus>,
    },

    /// A required value was absent or blank
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidArgument`]
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

fn describe_allowed(allowed: &[TicketStatus]) -> String {
    if allowed.is_empty() {
        return "(none - terminal status)".to_string();
    }

    allowed
        .iter()
        .map(|status| status.wire_name())
        .collect::<Vec<_>>()
        .join(", ")
}
