//! Ticket aggregate.

use crate::content::ContentNode;
use crate::error::DomainError;
use crate::export::{Exporter, PdfTextExporter};
use crate::status::{self, TicketStatus};
use crate::types::{TicketId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A support ticket
///
/// Status changes go through the transition table, except [`Ticket::assign`]
/// which always lands on [`TicketStatus::Assigned`]. Every mutator refreshes
/// the update timestamp; the creation timestamp and creator never change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    title: String,
    description: ContentNode,
    status: TicketStatus,
    priority: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    assigned_to: Option<UserId>,
    created_by: UserId,
    comments: Vec<String>,
}

impl Ticket {
    /// New open ticket with no assignee and no comments
    #[must_use]
    pub fn new(
        id: TicketId,
        title: impl Into<String>,
        description: ContentNode,
        priority: impl Into<String>,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description,
            status: TicketStatus::Open,
            priority: priority.into(),
            created_at: now,
            updated_at: now,
            assigned_to: None,
            created_by,
            comments: Vec::new(),
        }
    }

    /// Ticket identifier
    #[must_use]
    pub const fn id(&self) -> TicketId {
        self.id
    }

    /// Title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description tree
    #[must_use]
    pub const fn description(&self) -> &ContentNode {
        &self.description
    }

    /// Current status
    #[must_use]
    pub const fn status(&self) -> TicketStatus {
        self.status
    }

    /// Priority label
    #[must_use]
    pub fn priority(&self) -> &str {
        &self.priority
    }

    /// Creation timestamp
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the last mutation
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assignee, if any
    #[must_use]
    pub const fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Creator
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Comments in the order they were added
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Assigns the ticket and forces its status to `Assigned`
    ///
    /// This does not consult the transition table: it is accepted from any
    /// status, terminal ones included.
    pub fn assign(&mut self, user: UserId, now: DateTime<Utc>) {
        self.assigned_to = Some(user);
        self.status = TicketStatus::Assigned;
        self.updated_at = now;
    }

    /// Validated status change, returning the previous status
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidArgument`] when `to` is absent
    /// - [`DomainError::InvalidTransition`] when `to` is not a legal successor
    ///
    /// The ticket is untouched on error.
    pub fn change_status(
        &mut self,
        to: Option<TicketStatus>,
        now: DateTime<Utc>,
    ) -> Result<TicketStatus, DomainError> {
        let next = status::transition(self.status, to)?;
        let previous = std::mem::replace(&mut self.status, next);
        self.updated_at = now;
        Ok(previous)
    }

    /// Appends a comment
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] for empty or whitespace-only text.
    pub fn add_comment(
        &mut self,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::invalid_argument("comment cannot be blank"));
        }
        self.comments.push(text);
        self.updated_at = now;
        Ok(())
    }

    /// Replaces the whole description
    pub fn set_description(&mut self, description: ContentNode, now: DateTime<Utc>) {
        self.description = description;
        self.updated_at = now;
    }

    /// Changes the title
    pub fn rename(&mut self, title: impl Into<String>, now: DateTime<Utc>) {
        self.title = title.into();
        self.updated_at = now;
    }

    /// Changes the priority label
    pub fn set_priority(&mut self, priority: impl Into<String>, now: DateTime<Utc>) {
        self.priority = priority.into();
        self.updated_at = now;
    }

    /// Exports the description with `exporter`
    #[must_use]
    pub fn export_with(&self, exporter: &dyn Exporter) -> String {
        exporter.export(Some(&self.description))
    }

    /// Exports the description as a pseudo-PDF report
    #[must_use]
    pub fn export(&self) -> String {
        self.export_with(&PdfTextExporter)
    }

    /// One-line listing entry, e.g. `#1001 Login crash [Open] (High)`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "#{} {} [{}] ({})",
            self.id, self.title, self.status, self.priority
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn ticket() -> Ticket {
        Ticket::new(
            TicketId::new(1001),
            "Login crash",
            ContentNode::text("hello"),
            "High",
            UserId::new(1),
            t0(),
        )
    }

    #[test]
    fn new_ticket_is_open_and_unassigned() {
        let t = ticket();
        assert_eq!(t.status(), TicketStatus::Open);
        assert_eq!(t.assigned_to(), None);
        assert!(t.comments().is_empty());
        assert_eq!(t.created_at(), t.updated_at());
    }

    #[test]
    fn change_status_refreshes_timestamp() {
        let mut t = ticket();
        let later = t0() + Duration::minutes(5);
        let previous = t.change_status(Some(TicketStatus::Assigned), later).unwrap();
        assert_eq!(previous, TicketStatus::Open);
        assert_eq!(t.updated_at(), later);
        assert_eq!(t.created_at(), t0());
    }

    #[test]
    fn rejected_change_leaves_ticket_untouched() {
        let mut t = ticket();
        let before = t.clone();
        assert!(t.change_status(Some(TicketStatus::Done), t0() + Duration::minutes(1)).is_err());
        assert_eq!(t, before);
    }

    #[test]
    fn blank_comments_rejected() {
        let mut t = ticket();
        assert!(t.add_comment("   ", t0()).is_err());
        assert!(t.add_comment("", t0()).is_err());
        t.add_comment("first", t0()).unwrap();
        t.add_comment("second", t0()).unwrap();
        assert_eq!(t.comments(), ["first", "second"]);
    }

    #[test]
    fn assign_forces_assigned_from_terminal() {
        let mut t = ticket();
        t.change_status(Some(TicketStatus::Closed), t0()).unwrap();
        t.assign(UserId::new(2), t0());
        assert_eq!(t.status(), TicketStatus::Assigned);
        assert_eq!(t.assigned_to(), Some(UserId::new(2)));
    }

    #[test]
    fn setters_refresh_timestamp() {
        let mut t = ticket();
        let later = t0() + Duration::hours(1);
        t.rename("Login crash on Safari", later);
        t.set_priority("Critical", later);
        assert_eq!(t.title(), "Login crash on Safari");
        assert_eq!(t.priority(), "Critical");
        assert_eq!(t.updated_at(), later);
    }

    #[test]
    fn every_mutation_refreshes_timestamp() {
        let mut t = ticket();
        let later = t0() + Duration::minutes(10);

        t.assign(UserId::new(2), later);
        assert_eq!(t.updated_at(), later);

        let later = later + Duration::minutes(10);
        t.add_comment("looking into it", later).unwrap();
        assert_eq!(t.updated_at(), later);

        let later = later + Duration::minutes(10);
        t.set_description(
            ContentNode::composite([ContentNode::text("a"), ContentNode::image("/b.png", "")]),
            later,
        );
        assert_eq!(t.updated_at(), later);
        assert_eq!(t.created_at(), t0());
    }

    #[test]
    fn rejected_comment_keeps_timestamp() {
        let mut t = ticket();
        assert!(t.add_comment("  ", t0() + Duration::minutes(3)).is_err());
        assert_eq!(t.updated_at(), t0());
    }

    #[test]
    fn summary_line() {
        assert_eq!(ticket().summary(), "#1001 Login crash [Open] (High)");
    }
}
