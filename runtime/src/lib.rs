//! # Ticketdesk Runtime
//!
//! The [`Store`] owns the application state and is the only thing allowed to
//! mutate it.
//!
//! ## Core Components
//!
//! - **Store**: holds state behind a `RwLock`, runs the reducer under the write
//!   lock and executes the effects it returns
//! - **Action broadcast**: every action produced by an effect is broadcast to
//!   observers before being fed back into the reducer
//! - **Request/response**: [`Store::send_and_wait_for`] subscribes, sends and
//!   waits for the first matching reply
//!
//! ## Example
//!
//! ```ignore
//! use ticketdesk_runtime::Store;
//!
//! let store = Store::new(DeskState::default(), DeskReducer, environment);
//!
//! let reply = store
//!     .send_and_wait_for(command, |a| a.correlation_id() == Some(id), timeout)
//!     .await?;
//!
//! let open = store.state(|s| s.tickets.len()).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use ticketdesk_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{RwLock, watch};

/// Prometheus metrics for observability
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// No matching action arrived before the deadline
        ///
        /// Returned by `send_and_wait_for`.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Health check status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthStatus {
    /// Component is fully operational
    Healthy,

    /// Component is operational but under pressure
    Degraded,

    /// Component is not operational
    Unhealthy,
}

impl HealthStatus {
    /// Check if status is healthy
    #[must_use]
    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Check if status is unhealthy
    #[must_use]
    pub const fn is_unhealthy(self) -> bool {
        matches!(self, Self::Unhealthy)
    }

    /// Get the worst status between two statuses
    #[must_use]
    pub const fn worst(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unhealthy, _) | (_, Self::Unhealthy) => Self::Unhealthy,
            (Self::Degraded, _) | (_, Self::Degraded) => Self::Degraded,
            _ => Self::Healthy,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Degraded => write!(f, "degraded"),
            Self::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check result for a component
#[derive(Debug, Clone)]
pub struct HealthCheck {
    /// Name of the component being checked
    pub component: String,

    /// Current health status
    pub status: HealthStatus,

    /// Optional message providing details
    pub message: Option<String>,

    /// Extra key/value details (pending effects, observers, ...)
    pub metadata: Vec<(String, String)>,
}

impl HealthCheck {
    /// Create a healthy check result
    #[must_use]
    pub fn healthy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Healthy,
            message: None,
            metadata: Vec::new(),
        }
    }

    /// Create a degraded check result
    #[must_use]
    pub fn degraded(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Degraded,
            message: Some(message.into()),
            metadata: Vec::new(),
        }
    }

    /// Create an unhealthy check result
    #[must_use]
    pub fn unhealthy(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            metadata: Vec::new(),
        }
    }

    /// Add metadata to the health check
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}

/// Aggregated health report
#[derive(Debug, Clone)]
pub struct HealthReport {
    /// Overall status (worst of all checks)
    pub status: HealthStatus,

    /// Individual component checks
    pub checks: Vec<HealthCheck>,

    /// When the report was generated
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    /// Create a new health report from checks
    #[must_use]
    pub fn new(checks: Vec<HealthCheck>) -> Self {
        let status = checks
            .iter()
            .map(|c| c.status)
            .fold(HealthStatus::Healthy, HealthStatus::worst);

        Self {
            status,
            checks,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Check if overall system is healthy
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }
}

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use ticketdesk_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(512)
///     .with_shutdown_timeout(Duration::from_secs(10));
/// assert_eq!(config.broadcast_capacity, 512);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Number of actions buffered for slow observers
    pub broadcast_capacity: usize,
    /// Default timeout for graceful shutdown
    pub default_shutdown_timeout: Duration,
    /// Pending effects above which the store reports itself degraded
    pub degraded_pending_effects: usize,
}

impl StoreConfig {
    /// Set the action broadcast capacity (at least 1)
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    /// Set the default shutdown timeout
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.default_shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 256,
            default_shutdown_timeout: Duration::from_secs(30),
            degraded_pending_effects: 1000,
        }
    }
}

/// Handle for tracking completion of the effects started by one action
///
/// Returned by [`Store::send()`].
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };
        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Number of effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait until every effect started by the action has finished
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires first.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: completion counter shared by the effects of one action
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: decrements the effect counter on drop, even if the effect panics
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectTracking, HealthCheck, Ordering, Reducer, RwLock, StoreConfig,
        StoreError,
    };
    use tokio::sync::broadcast;

    /// The Store - single owner of a reducer's state
    ///
    /// Every action runs through the reducer while the write lock is held, so
    /// a lookup followed by a mutation inside one reducer call is atomic with
    /// respect to every other action. Readers go through [`Store::state`].
    ///
    /// Cloning a store is cheap and yields a handle to the same state.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        /// Every action produced by an effect, for observers and waiters
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + std::fmt::Debug + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with the default configuration
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Whether shutdown has been initiated
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Perform a health check on the Store
        ///
        /// Unhealthy once shutdown has started, degraded when too many effects
        /// are in flight.
        #[must_use]
        pub fn health(&self) -> HealthCheck {
            let pending = self.pending_effects.load(Ordering::Acquire);
            let observers = self.action_broadcast.receiver_count();

            let check = if self.is_shutting_down() {
                HealthCheck::unhealthy("store", "Store is shutting down")
            } else if pending > self.config.degraded_pending_effects {
                HealthCheck::degraded("store", format!("{pending} effects pending"))
            } else {
                HealthCheck::healthy("store")
            };

            check
                .with_metadata("pending_effects", pending.to_string())
                .with_metadata("observers", observers.to_string())
        }

        /// Initiate graceful shutdown of the store
        ///
        /// Rejects new actions, then waits for in-flight effects.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
        /// when the timeout expires.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store_shutdown_initiated_total").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(50);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timed out");
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tracing::debug!(
                    pending_effects = pending,
                    elapsed_ms = start.elapsed().as_millis(),
                    "Waiting for effects to complete"
                );

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Releases the lock and spawns the returned effects
        ///
        /// `send()` returns once effects are started, not finished; use the
        /// returned [`EffectHandle`] to wait for them.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.is_shutting_down() {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store_rejected_actions_total").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!(?action, "Processing action");

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                crate::metrics::StoreMetrics::record_command(start.elapsed());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            for effect in effects {
                self.execute_effect(effect, tracking.clone());
            }

            Ok(handle)
        }

        /// Send an action and wait for the first broadcast action matching
        /// `predicate`
        ///
        /// Subscribes before sending, so a reply produced immediately is never
        /// missed. Use correlation ids in the predicate to tell concurrent
        /// requests apart.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Timeout`]: no matching action before `timeout`
        /// - [`StoreError::ChannelClosed`]: the broadcast channel closed
        /// - [`StoreError::ShutdownInProgress`]: the store is shutting down
        pub async fn send_and_wait_for<F>(
            &self,
            action: A,
            predicate: F,
            timeout: Duration,
        ) -> Result<A, StoreError>
        where
            F: Fn(&A) -> bool,
        {
            let mut rx = self.action_broadcast.subscribe();

            self.send(action).await?;

            tokio::time::timeout(timeout, async {
                loop {
                    match rx.recv().await {
                        Ok(action) if predicate(&action) => return Ok(action),
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            // the awaited action may be among the skipped ones; the timeout covers it
                            tracing::warn!(skipped, "Action observer lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            return Err(StoreError::ChannelClosed);
                        }
                    }
                }
            })
            .await
            .map_err(|_| StoreError::Timeout)?
        }

        /// Subscribe to every action produced by effects
        ///
        /// Actions passed to [`Store::send`] directly are not broadcast.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let ticket_count = store.state(|s| s.tickets.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Execute an effect with tracking
        ///
        /// A produced action is broadcast first, then fed back through
        /// [`Store::send`].
        #[allow(clippy::needless_pass_by_value)] // tracking is moved into the spawned task
        fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                }
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let store = self.clone();
                    let tracking = tracking.clone();

                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking);
                        let _pending_guard = pending_guard;

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action");
                            let _ = store.action_broadcast.send(action.clone());
                            if let Err(error) = store.send(action).await {
                                tracing::debug!(%error, "Feedback action dropped");
                            }
                        }
                    });
                }
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                config: self.config.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

pub use store::Store;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ticketdesk_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

    #[derive(Debug, Clone, Default)]
    struct TestState {
        value: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        NoOp,
        ProduceEffect,
        Slow,
        Done,
    }

    #[derive(Debug, Clone)]
    struct TestEnv;

    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.value += 1;
                    smallvec![Effect::None]
                }
                TestAction::Decrement => {
                    state.value -= 1;
                    smallvec![Effect::None]
                }
                TestAction::NoOp | TestAction::Done => smallvec![Effect::None],
                TestAction::ProduceEffect => smallvec![Effect::reply(TestAction::Increment)],
                TestAction::Slow => smallvec![Effect::Future(Box::pin(async {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    Some(TestAction::Done)
                }))],
            }
        }
    }

    fn store() -> Store<TestState, TestAction, TestEnv, TestReducer> {
        Store::new(TestState::default(), TestReducer, TestEnv)
    }

    #[tokio::test]
    async fn test_send_action() {
        let store = store();
        let _ = store.send(TestAction::Increment).await;
        let _ = store.send(TestAction::Increment).await;
        let _ = store.send(TestAction::Decrement).await;
        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn test_effect_none() {
        let store = store();
        let mut handle = store.send(TestAction::NoOp).await.unwrap();
        handle.wait().await;
        assert_eq!(handle.pending(), 0);
        assert_eq!(store.state(|s| s.value).await, 0);
    }

    #[tokio::test]
    async fn test_effect_feedback() {
        let store = store();
        let mut handle = store.send(TestAction::ProduceEffect).await.unwrap();
        handle
            .wait_with_timeout(Duration::from_secs(1))
            .await
            .unwrap();
        // the produced action is fed back asynchronously
        for _ in 0..50 {
            if store.state(|s| s.value).await == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(store.state(|s| s.value).await, 1);
    }

    #[tokio::test]
    async fn test_send_and_wait_for_reply() {
        let store = store();
        let reply = store
            .send_and_wait_for(
                TestAction::ProduceEffect,
                |a| matches!(a, TestAction::Increment),
                Duration::from_secs(1),
            )
            .await
            .unwrap();
        assert_eq!(reply, TestAction::Increment);
    }

    #[tokio::test]
    async fn test_send_and_wait_for_timeout() {
        let store = store();
        let result = store
            .send_and_wait_for(
                TestAction::NoOp,
                |_| true,
                Duration::from_millis(50),
            )
            .await;
        assert_eq!(result, Err(StoreError::Timeout));
    }

    #[tokio::test]
    async fn test_shutdown_rejects_new_actions() {
        let store = store();
        store.shutdown(Duration::from_secs(1)).await.unwrap();
        assert!(store.is_shutting_down());
        assert!(store.health().status.is_unhealthy());
        assert_eq!(
            store.send(TestAction::Increment).await.unwrap_err(),
            StoreError::ShutdownInProgress
        );
    }

    #[tokio::test]
    async fn test_shutdown_timeout_with_pending_effects() {
        let store = store();
        let _ = store.send(TestAction::Slow).await.unwrap();
        let result = store.shutdown(Duration::from_millis(60)).await;
        assert_eq!(result, Err(StoreError::ShutdownTimeout(1)));
    }

    #[tokio::test]
    async fn test_health_reports_observers() {
        let store = store();
        let _rx = store.subscribe_actions();
        let check = store.health();
        assert!(check.status.is_healthy());
        assert!(
            check
                .metadata
                .contains(&("observers".to_string(), "1".to_string()))
        );
    }

    #[test]
    fn test_health_report_takes_worst() {
        let report = HealthReport::new(vec![
            HealthCheck::healthy("a"),
            HealthCheck::degraded("b", "slow"),
        ]);
        assert_eq!(report.status, HealthStatus::Degraded);
        assert!(!report.is_healthy());
    }

    #[test]
    fn test_zero_broadcast_capacity_is_clamped() {
        let config = StoreConfig::default().with_broadcast_capacity(0);
        assert_eq!(config.broadcast_capacity, 1);
    }
}
