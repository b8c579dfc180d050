//! # Ticketdesk Testing
//!
//! Testing utilities for reducers built on `ticketdesk-core`.
//!
//! This crate provides:
//! - Deterministic implementations of the environment traits
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use ticketdesk_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(DeskReducer)
//!     .with_env(test_environment())
//!     .given_state(DeskState::default())
//!     .when_action(DeskAction::Login { correlation_id: 1, user_id })
//!     .then_replies(|replies| assert_eq!(replies.len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use ticketdesk_core::environment::{Clock, TokenGenerator};


/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, TokenGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use ticketdesk_testing::mocks::FixedClock;
    /// use ticketdesk_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Never in practice: the timestamp is hardcoded.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable session tokens: `session_1`, `session_2`, ...
    #[derive(Debug, Default)]
    pub struct SequentialTokens {
        next: AtomicU64,
    }

    impl SequentialTokens {
        /// Start counting from 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }
    }

    impl TokenGenerator for SequentialTokens {
        fn generate(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            format!("session_{n}")
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialTokens, test_clock};
pub use reducer_test::{ReducerTest, assertions};
