//! Ticket status lifecycle.
//!
//! ```text
//! Open ──► Assigned ──► InValidation ──► Done
//!   │         │  ▲            │
//!   │         │  └────────────┘
//!   ▼         ▼
//! Closed ◄────┘
//! ```
//!
//! `Done` and `Closed` are terminal. There are no implicit self-loops.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ticket lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Created, waiting for someone to pick it up
    Open,
    /// Assigned to a user
    Assigned,
    /// Fix delivered, waiting for validation
    InValidation,
    /// Resolved and validated
    Done,
    /// Closed without resolution
    Closed,
}

impl TicketStatus {
    /// Every status, in lifecycle order
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::Assigned,
        Self::InValidation,
        Self::Done,
        Self::Closed,
    ];

    /// Legal successors of this status, in table order
    #[must_use]
    pub const fn allowed_successors(self) -> &'static [Self] {
        match self {
            Self::Open => &[Self::Assigned, Self::Closed],
            Self::Assigned => &[Self::InValidation, Self::Closed],
            Self::InValidation => &[Self::Done, Self::Assigned],
            Self::Done | Self::Closed => &[],
        }
    }

    /// Whether `to` is a legal successor of this status
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        self.allowed_successors().contains(&to)
    }

    /// Whether no transition leaves this status
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_successors().is_empty()
    }

    /// Human-readable label
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Assigned => "Assigned",
            Self::InValidation => "In validation",
            Self::Done => "Done",
            Self::Closed => "Closed",
        }
    }

    /// Name used on the wire (matches the serde representation)
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Assigned => "ASSIGNED",
            Self::InValidation => "IN_VALIDATION",
            Self::Done => "DONE",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    /// Accepts wire names (`IN_VALIDATION`, any case), variant names
    /// (`InValidation`) and display names (`In validation`, any case)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| {
                status.wire_name().eq_ignore_ascii_case(trimmed)
                    || status.display_name().eq_ignore_ascii_case(trimmed)
                    || format!("{status:?}") == trimmed
            })
            .ok_or_else(|| DomainError::invalid_argument(format!("Unknown ticket status: {s}")))
    }
}

/// `true` iff `to` is present and appears in `from`'s successor set
#[must_use]
pub fn can_transition(from: TicketStatus, to: Option<TicketStatus>) -> bool {
    to.is_some_and(|to| from.can_transition_to(to))
}

/// The transition-table row for `from`; empty for terminal statuses
#[must_use]
pub const fn allowed_successors(from: TicketStatus) -> &'static [TicketStatus] {
    from.allowed_successors()
}

/// Validated transition
///
/// # Errors
///
/// - [`DomainError::InvalidArgument`] when `to` is absent
/// - [`DomainError::InvalidTransition`] when `to` is not a legal successor,
///   carrying the attempted pair and the legal alternatives
pub fn transition(
    from: TicketStatus,
    to: Option<TicketStatus>,
) -> Result<TicketStatus, DomainError> {
    let to = to.ok_or_else(|| DomainError::invalid_argument("Target status cannot be empty"))?;

    if from.can_transition_to(to) {
        Ok(to)
    } else {
        Err(DomainError::InvalidTransition {
            from,
            to,
            allowed: from.allowed_successors().to_vec(),
        })
    }
}
