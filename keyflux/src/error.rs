use thiserror::Error;

/// Errors produced by the engine.
///
/// Only configuration can fail. A running game has no failure path: keys the engine does not
/// understand are ignored rather than reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Unknown difficulty '{0}'. Expected one of: easy, medium, hard")]
    InvalidDifficulty(String),

    #[error("Time limit must be a positive number of seconds, got {0}")]
    InvalidTimeLimit(u32),

    #[error("Word count must be positive")]
    InvalidWordCount,

    #[error("Cannot drop {requested} characters from a buffer holding {available}")]
    BufferUnderflow { requested: usize, available: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
