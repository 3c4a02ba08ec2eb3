//! # Words Module - Generated Text
//!
//! Supplies the words the player types. Each [`Difficulty`] maps to a fixed vocabulary, and a
//! [`WordSource`] draws from it uniformly at random. The random source is injected so that
//! tests (and replays) can seed it.
//!
//! ```rust
//! use keyflux::{Difficulty, WordSource};
//!
//! let mut source = WordSource::seeded(42);
//! let word: String = source.next_word(Difficulty::Hard).into_iter().collect();
//!
//! assert!(word.ends_with(' '));
//! assert!(Difficulty::Hard.words().contains(&word.trim_end()));
//! ```

use std::str::FromStr;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{Error, SEPARATOR};

const EASY: &[&str] = &[
    "neon", "flux", "grid", "wave", "core", "bit", "byte", "run", "void", "null", "zero", "one",
    "link", "node", "code", "key", "lock", "sync", "warp", "echo",
];

const MEDIUM: &[&str] = &[
    "system", "matrix", "vector", "pixel", "laser", "cyber", "neural", "logic", "proxy", "server",
    "client", "script", "binary", "router", "buffer",
];

const HARD: &[&str] = &[
    "encryption",
    "mainframe",
    "protocol",
    "bandwidth",
    "algorithm",
    "processor",
    "interface",
    "recursive",
    "heuristic",
    "firewall",
    "checksum",
];

/// Vocabulary tier
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// The fixed, non-empty vocabulary of this tier
    pub const fn words(self) -> &'static [&'static str] {
        match self {
            Self::Easy => EASY,
            Self::Medium => MEDIUM,
            Self::Hard => HARD,
        }
    }

    /// The next tier, wrapping from hard back to easy
    pub const fn cycle(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|difficulty| difficulty.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidDifficulty(s.to_string()))
    }
}

/// Random word generator over the [`Difficulty`] vocabularies
#[derive(Debug, Clone)]
pub struct WordSource<R = StdRng> {
    rng: R,
}

impl WordSource<StdRng> {
    /// A deterministic source. The same seed always yields the same words.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> WordSource<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one word for `difficulty`, followed by a single [`SEPARATOR`].
    pub fn next_word(&mut self, difficulty: Difficulty) -> Vec<char> {
        let words = difficulty.words();
        // Vocabularies are non-empty constants
        let word = words[self.rng.gen_range(0..words.len())];

        word.chars().chain(std::iter::once(SEPARATOR)).collect()
    }
}
