//! JSON shapes exchanged with clients.
//!
//! Field names follow the existing desktop client (`ticketID`, `userID`,
//! `descriptionContent`, ...), so they are spelled out with serde renames.

use crate::aggregates::DeskState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ticketdesk_domain::{ContentItem, Ticket, User};

// ============================================================================
// Responses
// ============================================================================

/// A ticket as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    /// Ticket id
    #[serde(rename = "ticketID")]
    pub ticket_id: u32,
    /// Title
    pub title: String,
    /// Human-readable status
    pub status: String,
    /// Priority label
    pub priority: String,
    /// Creator's name
    pub created_by_name: String,
    /// Assignee's name, or `Non assigné`
    pub assigned_to_name: String,
    /// Rendered description
    pub description: String,
    /// Description as flat items
    pub description_content: Vec<ContentItem>,
    /// Creation timestamp
    pub creation_date: DateTime<Utc>,
    /// Last update timestamp
    pub update_date: DateTime<Utc>,
}

/// Assignee label for unassigned tickets
pub const UNASSIGNED: &str = "Non assigné";

impl TicketDto {
    /// Build the DTO, resolving user names against the desk.
    #[must_use]
    pub fn from_ticket(ticket: &Ticket, desk: &DeskState) -> Self {
        Self {
            ticket_id: ticket.id().value(),
            title: ticket.title().to_string(),
            status: ticket.status().display_name().to_string(),
            priority: ticket.priority().to_string(),
            created_by_name: desk.user_name(ticket.created_by()),
            assigned_to_name: ticket
                .assigned_to()
                .map_or_else(|| UNASSIGNED.to_string(), |id| desk.user_name(id)),
            description: ticket.description().display(),
            description_content: ticket.description().to_items(),
            creation_date: ticket.created_at(),
            update_date: ticket.updated_at(),
        }
    }
}

/// A user as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    /// User id
    #[serde(rename = "userID")]
    pub user_id: u32,
    /// Display name
    pub name: String,
    /// Contact e-mail
    pub email: String,
    /// Role label; `Admin` for administrators
    pub role: String,
    /// Administrator flag
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.value(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: if user.is_admin {
                "Admin".to_string()
            } else {
                user.role.label().to_string()
            },
            is_admin: user.is_admin,
        }
    }
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Session token for the `Authorization` header
    pub token: String,
    /// Session user
    pub user: UserDto,
}

/// `GET /api/v1`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    /// API name
    pub name: &'static str,
    /// API version
    pub version: &'static str,
    /// Always `running`
    pub status: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Prefix of every endpoint
    pub base_url: &'static str,
}

// ============================================================================
// Requests
// ============================================================================

/// `POST /auth/login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// User logging in
    #[serde(rename = "userID", default)]
    pub user_id: i64,
}

/// `PATCH /tickets/:id/assignment`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentRequest {
    /// Assignee
    #[serde(rename = "userID", default)]
    pub user_id: i64,
}

/// `PATCH /tickets/:id/status`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    /// Target status, wire or variant name
    #[serde(default)]
    pub new_status: Option<String>,
}

/// `POST /tickets/:id/comments`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentRequest {
    /// Comment text
    #[serde(default)]
    pub text: Option<String>,
}

/// `POST /tickets` and `PUT /tickets/:id`
///
/// On update, absent fields and an empty item list leave the ticket alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    /// Title
    #[serde(default)]
    pub title: Option<String>,
    /// Priority label
    #[serde(default)]
    pub priority: Option<String>,
    /// Description items
    #[serde(default)]
    pub description_content: Vec<ContentItem>,
}
