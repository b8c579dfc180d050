//! Help-desk ticket server.
//!
//! One [`DeskStore`] owns every ticket, user and session. HTTP handlers turn
//! requests into [`DeskAction`] commands and wait for the matching reply;
//! an activity logger observes the reply broadcast.
//!
//! # Layout
//!
//! - [`aggregates`]: desk state, commands, replies and reducer
//! - [`api`]: JSON DTOs and REST handlers
//! - [`server`]: application state and router
//! - [`activity`]: broadcast observer that logs and counts replies
//! - [`seed`]: demo users and tickets
//! - [`config`]: environment configuration
//! - [`metrics`]: business counters

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod activity;
pub mod aggregates;
pub mod api;
pub mod config;
pub mod metrics;
pub mod seed;
pub mod server;

pub use aggregates::{DeskAction, DeskEnvironment, DeskReducer, DeskState};
pub use config::Config;
pub use server::{AppState, build_router};

use ticketdesk_runtime::{Store, StoreConfig};

/// The store owning the help desk
pub type DeskStore = Store<DeskState, DeskAction, DeskEnvironment, DeskReducer>;

/// Build an empty desk store sized from the configuration.
#[must_use]
pub fn build_store(config: &Config, environment: DeskEnvironment) -> DeskStore {
    let store_config = StoreConfig::default()
        .with_broadcast_capacity(config.store.broadcast_capacity)
        .with_shutdown_timeout(config.shutdown_timeout());

    Store::with_config(DeskState::new(), DeskReducer::new(), environment, store_config)
}
