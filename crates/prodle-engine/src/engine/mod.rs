//! Session lifecycle and orchestration.
//!
//! - [`GameSession`] - one game's state machine (cursor, score, guesses)
//! - [`SessionStore`] - concurrent registry of live sessions
//! - [`GameService`] - façade wiring the store to an injected roster
//!   provider; its operations map 1:1 onto the transport boundary
//! - [`RosterLookup`] / [`RosterProvider`] - seams to the roster dataset
//!   collaborator

pub use self::{provider::*, service::*, session::*, session_store::*};

mod provider;
mod service;
mod session;
mod session_store;
