//! # keyflux
//!
//! The engine behind the neontype typing game. It owns a rolling window of generated words,
//! classifies every keystroke against it, commits finished words, runs the one-second countdown
//! and computes the speed/accuracy score.
//!
//! The engine never renders, plays sounds or animates anything. Every piece of feedback is
//! published as an [`Event`] that the front end drains after each call into the
//! [`GameSession`].
//!
//! ```rust
//! use keyflux::{Configuration, Event, GameSession, WordSource};
//! use keyflux::timer::ManualScheduler;
//!
//! let mut session = GameSession::new(
//!     Configuration::default(),
//!     WordSource::seeded(7),
//!     ManualScheduler::default(),
//! );
//!
//! let expected = session.buffer().compare_at(0).unwrap();
//! session.submit_key(&expected.to_string());
//!
//! let events: Vec<Event> = session.drain_events().collect();
//! assert_eq!(events, vec![Event::CorrectHit(expected)]);
//! assert_eq!(session.counters().correct, 1);
//! ```

pub mod buffer;
pub mod committer;
pub mod config;
pub mod error;
pub mod event;
pub mod input_handler;
pub mod key;
pub mod render;
pub mod score;
pub mod session;
pub mod timer;
pub mod words;

pub use buffer::{Slot, SlotState, TextBuffer};
pub use config::Configuration;
pub use error::{Error, Result};
pub use event::Event;
pub use input_handler::{Counters, InputHandler};
pub use key::Key;
pub use score::Score;
pub use session::{GameSession, Phase};
pub use words::{Difficulty, WordSource};

/// Characters per word in the words-per-minute convention
pub const AVERAGE_WORD_LENGTH: u32 = 5;

/// The word-boundary character. Typing it asks the engine to commit the current word.
pub const SEPARATOR: char = ' ';

// Types for more general type-safety
type Seconds = f64;
type Minutes = f64;

// Get the minutes elapsed from a number of seconds
pub(crate) fn minutes(seconds: Seconds) -> Minutes {
    seconds / 60.0
}
