//! Aggregates owned by the server's store.

pub mod desk;

pub use desk::{
    DeskAction, DeskEnvironment, DeskReducer, DeskState, RejectionReason, TICKET_ID_BASE,
};
