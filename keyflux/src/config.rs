//! # Configuration Module - Game Parameters
//!
//! The parameters a [`GameSession`](crate::GameSession) is built from. A configuration is only
//! ever constructed validated, so the session can rely on a positive time limit and a non-empty
//! word window.
//!
//! ## Usage
//!
//! ```rust
//! use keyflux::{Configuration, Difficulty, Error};
//!
//! // Easy words, a one-minute countdown and a 30 word window
//! let config = Configuration::default();
//! assert_eq!(config.time_limit_seconds(), 60);
//!
//! let config = Configuration::new(Difficulty::Hard, 15, 20).unwrap();
//! assert_eq!(config.difficulty(), Difficulty::Hard);
//!
//! assert_eq!(
//!     Configuration::new(Difficulty::Easy, 0, 30),
//!     Err(Error::InvalidTimeLimit(0))
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::{Difficulty, Error, Result};

/// Time limits the front end cycles through, in seconds.
///
/// The engine accepts any positive limit; these are only the offered choices.
pub const TIME_LIMIT_PRESETS: [u32; 4] = [15, 30, 60, 120];

/// Words generated when a session is reset
pub const DEFAULT_WORD_COUNT: usize = 30;

/// The preset following `current`, wrapping around.
///
/// A limit that is not a preset moves to the first preset above it.
pub fn next_time_preset(current: u32) -> u32 {
    TIME_LIMIT_PRESETS
        .iter()
        .copied()
        .find(|preset| *preset > current)
        .unwrap_or(TIME_LIMIT_PRESETS[0])
}

/// Validated parameters of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration")]
pub struct Configuration {
    difficulty: Difficulty,
    time_limit_seconds: u32,
    word_count: usize,
}

impl Configuration {
    /// Build a configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTimeLimit`] if `time_limit_seconds` is zero
    /// - [`Error::InvalidWordCount`] if `word_count` is zero
    pub fn new(difficulty: Difficulty, time_limit_seconds: u32, word_count: usize) -> Result<Self> {
        if time_limit_seconds == 0 {
            return Err(Error::InvalidTimeLimit(time_limit_seconds));
        }

        if word_count == 0 {
            return Err(Error::InvalidWordCount);
        }

        Ok(Self {
            difficulty,
            time_limit_seconds,
            word_count,
        })
    }

    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub const fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// The same configuration with a different difficulty and time limit.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTimeLimit`] if `time_limit_seconds` is zero
    pub fn with(self, difficulty: Difficulty, time_limit_seconds: u32) -> Result<Self> {
        Self::new(difficulty, time_limit_seconds, self.word_count)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            time_limit_seconds: 60,
            word_count: DEFAULT_WORD_COUNT,
        }
    }
}

// Unvalidated form, so deserialization goes through `Configuration::new`
#[derive(Deserialize)]
struct RawConfiguration {
    difficulty: Difficulty,
    time_limit_seconds: u32,
    word_count: usize,
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = Error;

    fn try_from(raw: RawConfiguration) -> Result<Self> {
        Self::new(raw.difficulty, raw.time_limit_seconds, raw.word_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();

        assert_eq!(config.difficulty(), Difficulty::Easy);
        assert_eq!(config.time_limit_seconds(), 60);
        assert_eq!(config.word_count(), 30);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Configuration::new(Difficulty::Medium, 0, 30),
            Err(Error::InvalidTimeLimit(0))
        );
        assert_eq!(
            Configuration::new(Difficulty::Medium, 30, 0),
            Err(Error::InvalidWordCount)
        );

        // Any positive limit is accepted, not only presets
        let config = Configuration::new(Difficulty::Medium, 7, 1).unwrap();
        assert_eq!(config.time_limit_seconds(), 7);
    }

    #[test]
    fn test_with_keeps_word_count() {
        let config = Configuration::new(Difficulty::Easy, 60, 12).unwrap();
        let changed = config.with(Difficulty::Hard, 15).unwrap();

        assert_eq!(changed.difficulty(), Difficulty::Hard);
        assert_eq!(changed.time_limit_seconds(), 15);
        assert_eq!(changed.word_count(), 12);

        assert!(config.with(Difficulty::Hard, 0).is_err());
    }

    #[test]
    fn test_next_time_preset() {
        assert_eq!(next_time_preset(15), 30);
        assert_eq!(next_time_preset(30), 60);
        assert_eq!(next_time_preset(60), 120);
        assert_eq!(next_time_preset(120), 15);
        assert_eq!(next_time_preset(45), 60);
        assert_eq!(next_time_preset(500), 15);
    }
}
