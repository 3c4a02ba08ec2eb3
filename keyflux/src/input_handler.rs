//! # Input Handler Module - Keystroke Classification
//!
//! This module holds the per-keystroke half of the typing state machine. It compares a typed
//! character with the expected one, marks the slot, moves the cursor and keeps the counters that
//! the score is derived from.
//!
//! ## Slot Transitions
//!
#![doc = simple_mermaid::mermaid!("../diagrams/slot_states.mmd")]
//!
//! ## Usage Example
//!
//! ```rust
//! use keyflux::{Counters, Event, InputHandler, TextBuffer};
//!
//! let mut handler = InputHandler::new();
//! let mut buffer = TextBuffer::from_text("cat ");
//! let mut counters = Counters::default();
//!
//! assert_eq!(
//!     handler.process_input('C', &mut buffer, &mut counters),
//!     Some(Event::CorrectHit('c'))
//! );
//! assert_eq!(
//!     handler.process_input('x', &mut buffer, &mut counters),
//!     Some(Event::WrongHit('x'))
//! );
//! assert_eq!(counters.correct, 1);
//! assert_eq!(counters.total, 2);
//! assert_eq!(handler.cursor(), 2);
//! ```

use crate::buffer::{SlotState, TextBuffer};
use crate::{Event, SEPARATOR};

/// Running tallies for the score
///
/// `correct` never exceeds `total`: every decrement mirrors an earlier increment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    /// Correct keystrokes plus committed words
    pub correct: u32,
    /// All accepted keystrokes plus committed words
    pub total: u32,
    /// Consecutive correct actions since the last mistake
    pub combo: u32,
}

impl Counters {
    /// Returns true when the combo sits on a celebrated value (20, 30, 40, …)
    pub const fn is_milestone(&self) -> bool {
        self.combo > 10 && self.combo % 10 == 0
    }
}

/// Returns true if `key` is a character the game accepts as typing input
pub const fn is_accepted(key: char) -> bool {
    matches!(key, 'a'..='z' | ',' | '.')
}

/// Keystroke processor owning the cursor into the [`TextBuffer`]
///
/// # Performance
///
/// - Input processing: O(1) per keystroke
/// - Retraction: O(1)
#[derive(Debug, Default, Clone)]
pub struct InputHandler {
    /// Position of the next slot awaiting input
    cursor: usize,
}

impl InputHandler {
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }

    /// Position of the next slot awaiting input
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true if nothing in the current word has been typed
    pub const fn is_at_start(&self) -> bool {
        self.cursor == 0
    }

    /// Move the cursor back to the start of the window
    pub const fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Classify one typed character.
    ///
    /// The key is lowercased first. It is accepted when the cursor is inside the buffer and the
    /// key is a lowercase letter, a comma, a period, or a space where a space is expected.
    ///
    /// # Returns
    ///
    /// `Some(CorrectHit)` or `Some(WrongHit)` carrying the normalized key, or `None` if the key
    /// was ignored. Ignored keys never change any state.
    pub fn process_input(
        &mut self,
        key: char,
        buffer: &mut TextBuffer,
        counters: &mut Counters,
    ) -> Option<Event> {
        let key = key.to_ascii_lowercase();
        let slot = buffer.get_mut(self.cursor)?;

        if !(is_accepted(key) || (key == SEPARATOR && slot.compare == SEPARATOR)) {
            return None;
        }

        counters.total += 1;

        let event = if key == slot.compare {
            slot.state = SlotState::Correct;
            counters.correct += 1;
            counters.combo += 1;
            Event::CorrectHit(key)
        } else {
            slot.state = SlotState::Wrong;
            counters.combo = 0;
            Event::WrongHit(key)
        };

        self.cursor += 1;

        Some(event)
    }

    /// Retract the last typed slot.
    ///
    /// Undoes exactly what typing the slot did to `correct` and `total`. The combo is not
    /// restored.
    ///
    /// # Returns
    ///
    /// `Some(Event::Retracted)`, or `None` when the cursor is already at the start.
    pub fn retract(&mut self, buffer: &mut TextBuffer, counters: &mut Counters) -> Option<Event> {
        let index = self.cursor.checked_sub(1)?;
        let slot = buffer.get_mut(index)?;

        match slot.state {
            SlotState::Correct => {
                counters.correct = counters.correct.saturating_sub(1);
                counters.total = counters.total.saturating_sub(1);
            }
            SlotState::Wrong => {
                counters.total = counters.total.saturating_sub(1);
            }
            SlotState::Untyped => (),
        }

        slot.state = SlotState::Untyped;
        self.cursor = index;

        Some(Event::Retracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(text: &str) -> (InputHandler, TextBuffer, Counters) {
        (
            InputHandler::new(),
            TextBuffer::from_text(text),
            Counters::default(),
        )
    }

    #[test]
    fn test_correct_and_wrong_input() {
        let (mut handler, mut buffer, mut counters) = setup("abc ");

        let event = handler.process_input('a', &mut buffer, &mut counters);
        assert_eq!(event, Some(Event::CorrectHit('a')));
        assert_eq!(buffer.get(0).unwrap().state, SlotState::Correct);
        assert_eq!(counters.combo, 1);

        let event = handler.process_input('x', &mut buffer, &mut counters);
        assert_eq!(event, Some(Event::WrongHit('x')));
        assert_eq!(buffer.get(1).unwrap().state, SlotState::Wrong);
        assert_eq!(counters.combo, 0);

        assert_eq!(
            counters,
            Counters {
                correct: 1,
                total: 2,
                combo: 0
            }
        );
        assert_eq!(handler.cursor(), 2);
    }

    #[test]
    fn test_uppercase_is_normalized() {
        let (mut handler, mut buffer, mut counters) = setup("Neon ");

        let event = handler.process_input('N', &mut buffer, &mut counters);
        assert_eq!(event, Some(Event::CorrectHit('n')));

        let event = handler.process_input('E', &mut buffer, &mut counters);
        assert_eq!(event, Some(Event::CorrectHit('e')));
    }

    #[test]
    fn test_keys_outside_alphabet_are_ignored() {
        let (mut handler, mut buffer, mut counters) = setup("ab ");

        for key in ['1', '!', '-', '\n', 'é'] {
            assert_eq!(handler.process_input(key, &mut buffer, &mut counters), None);
        }

        assert_eq!(counters, Counters::default());
        assert_eq!(handler.cursor(), 0);
    }

    #[test]
    fn test_space_only_accepted_where_expected() {
        let (mut handler, mut buffer, mut counters) = setup("a b");

        assert_eq!(handler.process_input(' ', &mut buffer, &mut counters), None);

        handler.process_input('a', &mut buffer, &mut counters);
        let event = handler.process_input(' ', &mut buffer, &mut counters);
        assert_eq!(event, Some(Event::CorrectHit(' ')));
        assert_eq!(handler.cursor(), 2);
    }

    #[test]
    fn test_input_at_end_is_ignored() {
        let (mut handler, mut buffer, mut counters) = setup("a");

        handler.process_input('a', &mut buffer, &mut counters);
        let before = counters;

        assert_eq!(handler.process_input('a', &mut buffer, &mut counters), None);
        assert_eq!(counters, before);
        assert_eq!(handler.cursor(), 1);
    }

    #[test]
    fn test_retract_mirrors_typing() {
        let (mut handler, mut buffer, mut counters) = setup("abc ");

        handler.process_input('a', &mut buffer, &mut counters);
        handler.process_input('x', &mut buffer, &mut counters);

        // Retract the wrong slot
        assert_eq!(
            handler.retract(&mut buffer, &mut counters),
            Some(Event::Retracted)
        );
        assert_eq!(counters.correct, 1);
        assert_eq!(counters.total, 1);
        assert_eq!(buffer.get(1).unwrap().state, SlotState::Untyped);

        // Retract the correct slot
        handler.retract(&mut buffer, &mut counters);
        assert_eq!(counters.correct, 0);
        assert_eq!(counters.total, 0);
        assert_eq!(buffer.get(0).unwrap().state, SlotState::Untyped);
        assert_eq!(handler.cursor(), 0);

        // Nothing left to retract
        assert_eq!(handler.retract(&mut buffer, &mut counters), None);
        assert_eq!(counters.total, 0);
    }

    #[test]
    fn test_milestones() {
        let mut counters = Counters::default();

        for (combo, expected) in [(0, false), (10, false), (11, false), (20, true), (30, true)] {
            counters.combo = combo;
            assert_eq!(counters.is_milestone(), expected, "combo {combo}");
        }
    }
}
