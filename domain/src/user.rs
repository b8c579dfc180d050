//! Users, roles and permissions.
//!
//! There is a single user entity; administrators are users with
//! `is_admin` set.

use crate::types::UserId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Role label of a user
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Administrator
    Admin,
    /// Developer
    Developer,
    /// Any other label (tester, reporter, ...)
    Other(String),
}

impl Role {
    /// Parses a role label; unknown labels are kept verbatim
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else if trimmed.eq_ignore_ascii_case("developer")
            || trimmed.eq_ignore_ascii_case("developpeur")
        {
            Self::Developer
        } else {
            Self::Other(trimmed.to_string())
        }
    }

    /// Label shown to clients
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Admin => "Admin",
            Self::Developer => "Developer",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Actions gated by permissions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Create a ticket
    CreateTicket,
    /// Edit any ticket
    EditTicket,
    /// Delete a ticket
    DeleteTicket,
    /// Assign a ticket to a user
    AssignTicket,
    /// Change a ticket's status
    ChangeStatus,
    /// Comment on a ticket
    AddComment,
    /// Export a ticket description
    ExportTicket,
    /// See every ticket rather than only one's own
    ViewAllTickets,
}

/// A registered user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Contact e-mail
    pub email: String,
    /// Role label
    pub role: Role,
    /// Administrator flag
    pub is_admin: bool,
}

impl User {
    /// Regular user with the given role label
    #[must_use]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: &str,
    ) -> Self {
        let role = Role::from_label(role);
        let is_admin = role == Role::Admin;
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            is_admin,
        }
    }

    /// Administrator
    #[must_use]
    pub fn admin(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: Role::Admin,
            is_admin: true,
        }
    }

    /// Admins and developers may act on every ticket
    #[must_use]
    pub fn has_full_access(&self) -> bool {
        self.is_admin || self.role == Role::Developer
    }

    /// Whether this user holds `permission`
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        match permission {
            Permission::CreateTicket => true,
            Permission::DeleteTicket => self.is_admin,
            Permission::EditTicket
            | Permission::AssignTicket
            | Permission::ChangeStatus
            | Permission::AddComment
            | Permission::ExportTicket
            | Permission::ViewAllTickets => self.has_full_access(),
        }
    }

    /// Full-access users may edit any ticket, others only their own
    #[must_use]
    pub fn can_edit(&self, ticket_creator: UserId) -> bool {
        self.has_full_access() || self.id == ticket_creator
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}
