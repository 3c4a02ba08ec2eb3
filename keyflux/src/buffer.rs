//! # Buffer Module - The Rolling Text Window
//!
//! Holds the characters that are still ahead of the player. Each position is a [`Slot`] that
//! carries the character as displayed, the lowercase character input is compared against, and
//! the slot's typing state.
//!
//! The buffer is a rolling window rather than a fixed text: when a word is committed its
//! characters are dropped from the front and a freshly generated word is appended at the back,
//! so the window never runs dry.
//!
//! Data layout example: `"Neon grid "`
//! ```text
//! Raw:      [N][e][o][n][ ][g][r][i][d][ ]
//! Compare:  [n][e][o][n][ ][g][r][i][d][ ]
//! State:    [✓][✓][✗][·][·][·][·][·][·][·]
//! ```

use crate::{Difficulty, Error, Result, SEPARATOR, WordSource};

/// Typing state of one buffer position
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Not typed yet, or retracted with backspace
    #[default]
    Untyped,
    /// Typed and matched the expected character
    Correct,
    /// Typed and did not match
    Wrong,
}

impl SlotState {
    /// Returns true if the slot has received a keystroke
    pub const fn is_typed(self) -> bool {
        !matches!(self, Self::Untyped)
    }
}

/// One position in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// The character as it should be displayed
    pub raw: char,
    /// The lowercase character input is compared against
    pub compare: char,
    pub state: SlotState,
}

impl Slot {
    fn new(raw: char) -> Self {
        Self {
            raw,
            compare: raw.to_lowercase().next().unwrap_or(raw),
            state: SlotState::Untyped,
        }
    }
}

/// The rolling window of characters still to be typed
///
/// Raw and compare forms live in the same [`Slot`], so they stay index-aligned through every
/// append and prefix drop.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    slots: Vec<Slot>,
}

impl TextBuffer {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Create a buffer holding the given text, with every slot untyped
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.push_chars(text.chars());
        buffer
    }

    /// Number of slots in the window
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    /// The lowercase character expected at `index`
    pub fn compare_at(&self, index: usize) -> Option<char> {
        self.slots.get(index).map(|slot| slot.compare)
    }

    /// The window as displayed
    pub fn raw_text(&self) -> String {
        self.slots.iter().map(|slot| slot.raw).collect()
    }

    /// The window in its lowercase comparison form
    pub fn compare_text(&self) -> String {
        self.slots.iter().map(|slot| slot.compare).collect()
    }

    /// Returns true if any slot before `end` was typed wrong
    pub fn has_errors_before(&self, end: usize) -> bool {
        self.slots
            .iter()
            .take(end)
            .any(|slot| slot.state == SlotState::Wrong)
    }

    /// Returns true if the slot at `index` is a word separator
    pub fn is_separator_at(&self, index: usize) -> bool {
        self.compare_at(index) == Some(SEPARATOR)
    }

    /// Append characters as untyped slots
    pub fn push_chars(&mut self, chars: impl IntoIterator<Item = char>) {
        self.slots.extend(chars.into_iter().map(Slot::new));
    }

    /// Drop everything and fill the window with `word_count` fresh words
    pub fn fill(&mut self, source: &mut WordSource, difficulty: Difficulty, word_count: usize) {
        self.slots.clear();
        for _ in 0..word_count {
            let word = source.next_word(difficulty);
            self.push_chars(word);
        }
    }

    /// Remove the first `count` slots and append `next_word` at the back.
    ///
    /// Asking for more slots than the window holds leaves the buffer untouched and returns
    /// [`Error::BufferUnderflow`].
    pub fn commit_prefix(
        &mut self,
        count: usize,
        next_word: impl IntoIterator<Item = char>,
    ) -> Result<()> {
        if count > self.slots.len() {
            return Err(Error::BufferUnderflow {
                requested: count,
                available: self.slots.len(),
            });
        }

        self.slots.drain(..count);
        self.push_chars(next_word);
        Ok(())
    }
}
