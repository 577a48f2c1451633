//! Core engine for the pro-player guessing game: attribute comparison,
//! scoring, difficulty tiers and the session state machine, independent of
//! any transport or dataset format.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

pub use crate::core::{difficulty::Difficulty, input::InputError};

/// Failures of a single guess submission.
///
/// All variants are recoverable at the caller; a rejected guess never
/// mutates session state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GuessError {
    /// No live session is registered under the given id.
    #[display("game session not found")]
    SessionNotFound,
    /// The session has already completed and accepts no further guesses.
    #[display("game session has already ended")]
    SessionTerminated,
    /// The guess text failed sanitization or length validation.
    #[display("invalid guess: {reason}")]
    InvalidInput { reason: InputError },
    /// The name does not resolve to any candidate in the dataset.
    #[display("player not found: {name}")]
    UnknownPlayer { name: String },
    /// The name resolves to a real candidate outside the session's tier.
    #[display("player not in difficulty: {name} is not part of the {difficulty} pool")]
    NotInDifficulty { name: String, difficulty: Difficulty },
}

/// Failures of session creation.
///
/// Both are fatal to the request, never to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CreateSessionError {
    /// The candidate pool for the requested tier is empty.
    #[display("no candidates available for the {difficulty} pool")]
    DataUnavailable { difficulty: Difficulty },
    /// The OS entropy source failed to produce a session id.
    #[display("failed to generate a session id")]
    GenerationError,
}
