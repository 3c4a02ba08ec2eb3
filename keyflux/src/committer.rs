//! # Committer Module - Word Boundary Handling
//!
//! The separator key does not type a character. It asks for the current word to be committed.
//! A word commits only when the cursor sits on its separator and nothing typed in it is wrong;
//! otherwise the word is rejected in place and the player has to correct it.

use tracing::{debug, warn};

use crate::buffer::TextBuffer;
use crate::input_handler::{Counters, InputHandler};
use crate::Event;

/// Evaluate the word typed so far.
///
/// On success the word and its separator are dropped from the buffer, `next_word` is appended,
/// the cursor rewinds to zero and `correct`, `total` and `combo` each grow by one.
///
/// On failure nothing in the buffer moves and the combo resets.
///
/// # Returns
///
/// `Some(WordSuccess)`, `Some(WordFail(range))`, or `None` when the cursor is already past the
/// end of the buffer (the key is ignored).
///
/// ```rust
/// use keyflux::committer::submit_separator;
/// use keyflux::{Counters, Event, InputHandler, TextBuffer};
///
/// let mut handler = InputHandler::new();
/// let mut buffer = TextBuffer::from_text("cat dog ");
/// let mut counters = Counters::default();
///
/// for key in "cat".chars() {
///     handler.process_input(key, &mut buffer, &mut counters);
/// }
///
/// let event = submit_separator(&mut handler, &mut buffer, &mut counters, || "emu ".chars().collect());
/// assert_eq!(event, Some(Event::WordSuccess));
/// assert_eq!(buffer.raw_text(), "dog emu ");
/// assert_eq!(handler.cursor(), 0);
/// ```
pub fn submit_separator(
    handler: &mut InputHandler,
    buffer: &mut TextBuffer,
    counters: &mut Counters,
    next_word: impl FnOnce() -> Vec<char>,
) -> Option<Event> {
    let cursor = handler.cursor();
    if cursor >= buffer.len() {
        return None;
    }

    let at_separator = buffer.is_separator_at(cursor);
    let has_errors = buffer.has_errors_before(cursor);

    if at_separator && !has_errors {
        let word_len = cursor + 1;
        if let Err(error) = buffer.commit_prefix(word_len, next_word()) {
            // The cursor is inside the buffer, so the prefix always fits
            warn!("Rejected word commit: {error}");
            counters.combo = 0;
            return Some(Event::WordFail(0..word_len));
        }

        counters.correct += 1;
        counters.total += 1;
        counters.combo += 1;
        handler.rewind();

        debug!(word_len, combo = counters.combo, "Word committed");
        Some(Event::WordSuccess)
    } else {
        counters.combo = 0;

        debug!(cursor, at_separator, has_errors, "Word rejected");
        Some(Event::WordFail(0..cursor + 1))
    }
}
