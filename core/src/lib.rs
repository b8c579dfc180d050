//! # Ticketdesk Core
//!
//! Core traits and types for the ticketdesk help-desk service.
//!
//! The service is built as a functional core with an imperative shell:
//!
//! - **State**: the help-desk data (tickets, users, sessions)
//! - **Action**: every input to a reducer (commands and the replies they produce)
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of follow-up work, executed by the runtime
//! - **Environment**: injected dependencies (clock, token generator)
//!
//! ## Example
//!
//! ```ignore
//! use ticketdesk_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = CounterEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         env: &CounterEnvironment,
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         state.count += 1;
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Declarative macros for building effects
pub mod effect_macros;

/// Reducer module - the trait holding all business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They validate the action, update state in place and describe any follow-up
/// work as [`Effect`](crate::effect::Effect) values.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// The runtime calls this while holding exclusive access to the state,
        /// so every lookup and mutation done here is atomic with respect to
        /// other actions.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects are values returned by reducers. The runtime executes them after
/// the reducer has released the state, and feeds any produced action back
/// through the store.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is broadcast to
        /// observers and fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action>
    where
        Action: Send + 'static,
    {
        /// Emit `action` as soon as the effect runs
        ///
        /// Used by reducers to publish the outcome of a command to whoever is
        /// waiting on the action broadcast.
        #[must_use]
        pub fn reply(action: Action) -> Self {
            crate::async_effect! { Some(action) }
        }
    }

    impl<Action> Effect<Action> {
        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - dependency injection traits
///
/// All sources of non-determinism used by reducers sit behind these traits so
/// tests can swap in fixed implementations.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of opaque session tokens
    pub trait TokenGenerator: Send + Sync {
        /// Produce a fresh token
        fn generate(&self) -> String;
    }

    /// Token generator producing `session_<uuid v4>` tokens
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidTokenGenerator;

    impl TokenGenerator for UuidTokenGenerator {
        fn generate(&self) -> String {
            format!("session_{}", uuid::Uuid::new_v4())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, SystemClock, TokenGenerator, UuidTokenGenerator};

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn uuid_tokens_are_prefixed_and_unique() {
        let tokens = UuidTokenGenerator;
        let a = tokens.generate();
        let b = tokens.generate();
        assert!(a.starts_with("session_"));
        assert_ne!(a, b);
    }

    #[test]
    fn reply_resolves_to_the_action() {
        let effect = Effect::reply(7_u32);
        let Effect::Future(fut) = effect else {
            unreachable!("reply always builds a future effect");
        };
        assert_eq!(tokio_test::block_on(fut), Some(7));
    }

    #[test]
    fn debug_output_names_variant() {
        assert_eq!(format!("{:?}", Effect::<u32>::None), "Effect::None");
        assert!(Effect::<u32>::None.is_none());
        assert_eq!(
            format!("{:?}", Effect::reply(1_u32)),
            "Effect::Future(<future>)"
        );
    }
}
