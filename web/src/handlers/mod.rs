//! Reusable HTTP handlers.

pub mod health;
