//! Integration tests for Store action broadcasting
//!
//! Covers the request/response pattern used by HTTP handlers: concurrent
//! commands tagged with correlation ids, each waiting for its own reply.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::time::Duration;
use ticketdesk_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use ticketdesk_runtime::Store;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Reserve a slot, replying with its number
    Reserve { correlation_id: u64 },
    /// Release a slot that must exist
    Release { correlation_id: u64, slot: u32 },
    /// Successful reply
    Reserved { correlation_id: u64, slot: u32 },
    /// Successful release
    Released { correlation_id: u64 },
    /// Rejected command
    Rejected { correlation_id: u64, reason: String },
}

impl TestAction {
    const fn reply_to(&self) -> Option<u64> {
        match self {
            Self::Reserved { correlation_id, .. }
            | Self::Released { correlation_id }
            | Self::Rejected { correlation_id, .. } => Some(*correlation_id),
            Self::Reserve { .. } | Self::Release { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct TestState {
    next_slot: u32,
    slots: Vec<u32>,
}

#[derive(Clone)]
struct TestEnvironment;

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = TestEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Reserve { correlation_id } => {
                state.next_slot += 1;
                let slot = state.next_slot;
                state.slots.push(slot);
                smallvec![Effect::reply(TestAction::Reserved {
                    correlation_id,
                    slot
                })]
            }
            TestAction::Release {
                correlation_id,
                slot,
            } => {
                // find and remove under the same lock
                if let Some(index) = state.slots.iter().position(|s| *s == slot) {
                    state.slots.remove(index);
                    smallvec![Effect::reply(TestAction::Released { correlation_id })]
                } else {
                    smallvec![Effect::reply(TestAction::Rejected {
                        correlation_id,
                        reason: format!("slot {slot} not found"),
                    })]
                }
            }
            TestAction::Reserved { .. }
            | TestAction::Released { .. }
            | TestAction::Rejected { .. } => SmallVec::new(),
        }
    }
}

fn store() -> Store<TestState, TestAction, TestEnvironment, TestReducer> {
    Store::new(TestState::default(), TestReducer, TestEnvironment)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_send_and_wait_for_matches_correlation_id() {
    let store = store();

    let reply = store
        .send_and_wait_for(
            TestAction::Reserve { correlation_id: 7 },
            |a| a.reply_to() == Some(7),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(
        reply,
        TestAction::Reserved {
            correlation_id: 7,
            slot: 1
        }
    );
}

#[tokio::test]
async fn test_concurrent_requests_get_their_own_replies() {
    let store = store();

    let mut tasks = Vec::new();
    for id in 0..32_u64 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    TestAction::Reserve { correlation_id: id },
                    move |a| a.reply_to() == Some(id),
                    Duration::from_secs(2),
                )
                .await
        }));
    }

    let mut slots = Vec::new();
    for (id, task) in tasks.into_iter().enumerate() {
        match task.await.unwrap().unwrap() {
            TestAction::Reserved {
                correlation_id,
                slot,
            } => {
                assert_eq!(correlation_id, id as u64);
                slots.push(slot);
            }
            other => panic!("unexpected reply {other:?}"),
        }
    }

    slots.sort_unstable();
    assert_eq!(slots, (1..=32).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_double_release_is_rejected_once() {
    let store = store();
    let _ = store
        .send_and_wait_for(
            TestAction::Reserve { correlation_id: 1 },
            |a| a.reply_to() == Some(1),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        store.send_and_wait_for(
            TestAction::Release {
                correlation_id: 2,
                slot: 1
            },
            |a| a.reply_to() == Some(2),
            Duration::from_secs(1),
        ),
        store.send_and_wait_for(
            TestAction::Release {
                correlation_id: 3,
                slot: 1
            },
            |a| a.reply_to() == Some(3),
            Duration::from_secs(1),
        ),
    );

    let rejected = [a.unwrap(), b.unwrap()]
        .into_iter()
        .filter(|r| matches!(r, TestAction::Rejected { .. }))
        .count();
    assert_eq!(rejected, 1);
    assert!(store.state(|s| s.slots.is_empty()).await);
}

#[tokio::test]
async fn test_observers_see_every_reply() {
    let store = store();
    let mut rx = store.subscribe_actions();

    let _ = store.send(TestAction::Reserve { correlation_id: 1 }).await.unwrap();
    let _ = store.send(TestAction::Reserve { correlation_id: 2 }).await.unwrap();

    let mut seen = Vec::new();
    for _ in 0..2 {
        let action = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        seen.push(action.reply_to().unwrap());
    }
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2]);
}
