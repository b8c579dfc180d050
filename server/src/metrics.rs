//! Business metrics for the help desk.
//!
//! # Exported Metrics
//!
//! - `ticketdesk_tickets_created_total` - tickets opened
//! - `ticketdesk_tickets_deleted_total` - tickets removed
//! - `ticketdesk_comments_total` - comments appended
//! - `ticketdesk_status_changes_total{to}` - status changes by target status
//! - `ticketdesk_sessions_opened_total` - successful logins
//! - `ticketdesk_rejected_commands_total{reason}` - refused commands by reason

use metrics::describe_counter;
use ticketdesk_domain::TicketStatus;

use crate::aggregates::RejectionReason;

/// Register descriptions for every business metric.
///
/// Call once at startup, after the recorder is installed.
pub fn register_desk_metrics() {
    describe_counter!("ticketdesk_tickets_created_total", "Total number of tickets opened");
    describe_counter!("ticketdesk_tickets_deleted_total", "Total number of tickets deleted");
    describe_counter!("ticketdesk_comments_total", "Total number of comments added");
    describe_counter!(
        "ticketdesk_status_changes_total",
        "Status changes (validated or forced by assignment) by target status"
    );
    describe_counter!("ticketdesk_sessions_opened_total", "Total number of logins");
    describe_counter!(
        "ticketdesk_rejected_commands_total",
        "Commands refused by the desk, by reason"
    );

    tracing::info!("Desk metrics registered");
}

/// Record a ticket creation.
pub fn record_ticket_created() {
    metrics::counter!("ticketdesk_tickets_created_total").increment(1);
}

/// Record a ticket deletion.
pub fn record_ticket_deleted() {
    metrics::counter!("ticketdesk_tickets_deleted_total").increment(1);
}

/// Record a comment.
pub fn record_comment_added() {
    metrics::counter!("ticketdesk_comments_total").increment(1);
}

/// Record a status change.
pub fn record_status_change(to: TicketStatus) {
    metrics::counter!("ticketdesk_status_changes_total", "to" => to.wire_name()).increment(1);
}

/// Record a login.
pub fn record_session_opened() {
    metrics::counter!("ticketdesk_sessions_opened_total").increment(1);
}

/// Record a refused command.
pub fn record_rejection(reason: &RejectionReason) {
    metrics::counter!("ticketdesk_rejected_commands_total", "reason" => reason.label()).increment(1);
}
