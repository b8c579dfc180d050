//! HTTP server module for the help desk.
//!
//! - Application state shared by handlers
//! - Router configuration

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
