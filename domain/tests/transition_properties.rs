//! Property tests for the ticket lifecycle.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use chrono::Utc;
use proptest::prelude::*;
use ticketdesk_domain::status::{allowed_successors, can_transition, transition};
use ticketdesk_domain::{ContentNode, DomainError, Ticket, TicketId, TicketStatus, UserId};

const TABLE: &[(TicketStatus, TicketStatus)] = &[
    (TicketStatus::Open, TicketStatus::Assigned),
    (TicketStatus::Open, TicketStatus::Closed),
    (TicketStatus::Assigned, TicketStatus::InValidation),
    (TicketStatus::Assigned, TicketStatus::Closed),
    (TicketStatus::InValidation, TicketStatus::Done),
    (TicketStatus::InValidation, TicketStatus::Assigned),
];

fn any_status() -> impl Strategy<Value = TicketStatus> {
    prop::sample::select(TicketStatus::ALL.to_vec())
}

fn open_ticket() -> Ticket {
    Ticket::new(
        TicketId::new(1001),
        "Property",
        ContentNode::text("body"),
        "Low",
        UserId::new(1),
        Utc::now(),
    )
}

proptest! {
    #[test]
    fn transitions_match_the_table(from in any_status(), to in any_status()) {
        let listed = TABLE.contains(&(from, to));
        prop_assert_eq!(can_transition(from, Some(to)), listed);

        match transition(from, Some(to)) {
            Ok(next) => {
                prop_assert!(listed);
                prop_assert_eq!(next, to);
            }
            Err(DomainError::InvalidTransition { from: f, to: t, allowed }) => {
                prop_assert!(!listed);
                prop_assert_eq!((f, t), (from, to));
                prop_assert_eq!(allowed.as_slice(), allowed_successors(from));
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    #[test]
    fn random_walks_only_follow_legal_edges(steps in prop::collection::vec(any_status(), 0..20)) {
        let mut ticket = open_ticket();
        for target in steps {
            let before = ticket.status();
            match ticket.change_status(Some(target), Utc::now()) {
                Ok(previous) => {
                    prop_assert_eq!(previous, before);
                    prop_assert!(TABLE.contains(&(before, target)));
                    prop_assert_eq!(ticket.status(), target);
                }
                Err(_) => prop_assert_eq!(ticket.status(), before),
            }
        }
    }
}

#[test]
fn terminal_statuses_have_no_successors() {
    for status in [TicketStatus::Done, TicketStatus::Closed] {
        assert!(allowed_successors(status).is_empty());
        assert!(status.is_terminal());
    }
}

#[test]
fn open_to_assigned_then_back_fails() {
    let mut ticket = open_ticket();
    ticket
        .change_status(Some(TicketStatus::Assigned), Utc::now())
        .unwrap();

    let err = ticket
        .change_status(Some(TicketStatus::Open), Utc::now())
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidTransition {
            from: TicketStatus::Assigned,
            to: TicketStatus::Open,
            allowed: vec![TicketStatus::InValidation, TicketStatus::Closed],
        }
    );
}

#[test]
fn assign_bypasses_the_table_from_validation() {
    let mut ticket = open_ticket();
    ticket
        .change_status(Some(TicketStatus::Assigned), Utc::now())
        .unwrap();
    ticket
        .change_status(Some(TicketStatus::InValidation), Utc::now())
        .unwrap();

    ticket.assign(UserId::new(2), Utc::now());

    assert_eq!(ticket.status(), TicketStatus::Assigned);
    assert_eq!(ticket.assigned_to(), Some(UserId::new(2)));
}

#[test]
fn status_wire_names_round_trip_through_json() {
    let json = serde_json::to_string(&TicketStatus::InValidation).unwrap();
    assert_eq!(json, "\"IN_VALIDATION\"");
    let back: TicketStatus = serde_json::from_str(&json).unwrap();
    assert_eq!(back, TicketStatus::InValidation);
}
