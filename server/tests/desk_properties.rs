//! Property tests for the desk reducer.
//!
//! Random command sequences must keep ticket ids unique and increasing, and
//! a rejected command must leave tickets untouched.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use ticketdesk_core::reducer::Reducer;
use ticketdesk_domain::{ContentNode, TicketId, TicketStatus, User, UserId};
use ticketdesk_server::aggregates::TICKET_ID_BASE;
use ticketdesk_server::{DeskAction, DeskEnvironment, DeskReducer, DeskState};
use ticketdesk_testing::{SequentialTokens, assertions, test_clock};
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Step {
    Create { title: String },
    Delete { offset: u32, admin: bool },
    Status { offset: u32, to: Option<TicketStatus> },
    Assign { offset: u32, user: u32 },
}

fn any_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[ a-zA-Z]{0,12}".prop_map(|title| Step::Create { title }),
        (0..6_u32, any::<bool>()).prop_map(|(offset, admin)| Step::Delete { offset, admin }),
        (0..6_u32, prop::option::of(prop::sample::select(TicketStatus::ALL.to_vec())))
            .prop_map(|(offset, to)| Step::Status { offset, to }),
        (0..6_u32, prop::sample::select(vec![1_u32, 2, 3, 100]))
            .prop_map(|(offset, user)| Step::Assign { offset, user }),
    ]
}

fn desk() -> DeskState {
    let mut state = DeskState::new();
    for user in [
        User::new(UserId::new(1), "Dev", "dev@example.com", "Developer"),
        User::new(UserId::new(2), "Tester", "tester@example.com", "Tester"),
        User::admin(UserId::new(100), "Admin", "admin@example.com"),
    ] {
        state.users.insert(user.id, user);
    }
    state
}

fn command(step: Step) -> DeskAction {
    let correlation_id = Uuid::new_v4();
    let ticket = |offset: u32| TicketId::new(TICKET_ID_BASE + 1 + offset);
    match step {
        Step::Create { title } => DeskAction::CreateTicket {
            correlation_id,
            title,
            priority: "Normal".to_string(),
            description: ContentNode::text("generated"),
            created_by: None,
        },
        Step::Delete { offset, admin } => DeskAction::DeleteTicket {
            correlation_id,
            ticket_id: ticket(offset),
            requested_by: UserId::new(if admin { 100 } else { 1 }),
        },
        Step::Status { offset, to } => DeskAction::ChangeStatus {
            correlation_id,
            ticket_id: ticket(offset),
            to,
        },
        Step::Assign { offset, user } => DeskAction::AssignTicket {
            correlation_id,
            ticket_id: ticket(offset),
            user_id: UserId::new(user),
            requested_by: UserId::new(1),
        },
    }
}

proptest! {
    #[test]
    fn commands_keep_ids_unique_and_rejections_pure(steps in prop::collection::vec(any_step(), 1..40)) {
        let env = DeskEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialTokens::new()));
        let mut state = desk();
        let mut issued = BTreeSet::new();
        let mut last_id = TICKET_ID_BASE;

        for step in steps {
            let before = state.tickets.clone();
            let effects = DeskReducer.reduce(&mut state, command(step), &env);
            let replies = assertions::resolve_replies(effects);
            prop_assert_eq!(replies.len(), 1);

            match &replies[0] {
                DeskAction::TicketCreated { ticket, .. } => {
                    prop_assert!(ticket.id().value() > last_id);
                    prop_assert!(issued.insert(ticket.id()));
                    last_id = ticket.id().value();
                }
                DeskAction::TicketUpdated { ticket, previous_status: Some(previous), .. } => {
                    let legal = previous.can_transition_to(ticket.status())
                        || ticket.status() == TicketStatus::Assigned;
                    prop_assert!(legal);
                }
                DeskAction::CommandRejected { .. } => {
                    prop_assert_eq!(&before, &state.tickets);
                }
                _ => {}
            }

            prop_assert_eq!(state.next_ticket_id, last_id);
        }
    }
}
