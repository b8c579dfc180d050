//! Ticket domain model for the ticketdesk help-desk service.
//!
//! This crate holds the only parts of the system with real invariants:
//!
//! - [`status`]: the five-state ticket lifecycle and its fixed transition table
//! - [`content`]: ticket descriptions as a tree of text, image and video leaves
//!   grouped by composites
//! - [`export`]: format-specific renderers that walk a content tree
//! - [`ticket`]: the aggregate tying status, description and comments together
//!
//! Everything here is synchronous and free of I/O. Operations either complete
//! or return a [`DomainError`]; nothing is logged from inside the domain.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use ticketdesk_domain::{ContentNode, Ticket, TicketId, TicketStatus, UserId};
//!
//! let mut ticket = Ticket::new(
//!     TicketId::new(1001),
//!     "Login crash",
//!     ContentNode::text("Crash after three failed attempts"),
//!     "High",
//!     UserId::new(1),
//!     Utc::now(),
//! );
//!
//! ticket.change_status(Some(TicketStatus::Assigned), Utc::now())?;
//! assert!(ticket.change_status(Some(TicketStatus::Open), Utc::now()).is_err());
//! # Ok::<(), ticketdesk_domain::DomainError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod content;
pub mod error;
pub mod export;
pub mod status;
pub mod ticket;
pub mod types;
pub mod user;
pub mod validation;

pub use content::{ContentItem, ContentKind, ContentNode};
pub use error::DomainError;
pub use export::{ExportFormat, Exporter, PdfTextExporter, export};
pub use status::TicketStatus;
pub use ticket::Ticket;
pub use types::{TicketId, UserId};
pub use user::{Permission, Role, User};
