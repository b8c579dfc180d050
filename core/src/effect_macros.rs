//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block evaluates to `Option<Action>`; `Some` is fed back into the store.
///
/// # Example
///
/// ```rust
/// use ticketdesk_core::{async_effect, effect::Effect};
///
/// let effect: Effect<u32> = async_effect! {
///     Some(42)
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
