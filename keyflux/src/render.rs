use crate::buffer::{Slot, TextBuffer};

/// Everything a front end needs to draw one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingContext<'a> {
    pub slot: &'a Slot,
    pub index: usize,
    pub has_cursor: bool,
    /// The slot belongs to the word being typed
    pub in_current_word: bool,
}

/// One wrapped line of slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext<'a> {
    /// Line index relative to the line holding the cursor
    pub active_line_offset: isize,
    pub contents: Vec<RenderingContext<'a>>,
}

/// Configuration for line rendering behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRenderConfig {
    /// Maximum number of slots per line
    pub line_length: usize,
}

impl LineRenderConfig {
    pub const fn new(line_length: usize) -> Self {
        Self { line_length }
    }
}

/// Iterator over the slots of a buffer with cursor information attached
#[derive(Debug, Clone)]
pub struct RenderingIterator<'a> {
    slots: &'a [Slot],
    index: usize,
    cursor: usize,
    current_word_end: usize,
}

impl<'a> RenderingIterator<'a> {
    pub fn new(buffer: &'a TextBuffer, cursor: usize) -> Self {
        let slots = buffer.slots();

        // The current word runs through its separator, or through the cursor if typing overran it
        let separator_end = slots
            .iter()
            .position(|slot| slot.compare == crate::SEPARATOR)
            .map_or(slots.len(), |index| index + 1);

        Self {
            slots,
            index: 0,
            cursor,
            current_word_end: separator_end.max(cursor),
        }
    }
}

impl ExactSizeIterator for RenderingIterator<'_> {}

impl std::iter::FusedIterator for RenderingIterator<'_> {}

impl<'a> Iterator for RenderingIterator<'a> {
    type Item = RenderingContext<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.slots.get(self.index)?;

        let context = RenderingContext {
            slot,
            index: self.index,
            has_cursor: self.index == self.cursor,
            in_current_word: self.index < self.current_word_end,
        };

        self.index += 1;
        Some(context)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.slots.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

/// Break rendering contexts into lines of at most `config.line_length` slots.
///
/// Lines break after a separator when the following word would not fit. Words longer than a
/// whole line are split.
pub fn wrap_lines<'a>(
    contexts: impl IntoIterator<Item = RenderingContext<'a>>,
    config: LineRenderConfig,
) -> Vec<LineContext<'a>> {
    let line_length = config.line_length.max(1);
    let contexts: Vec<_> = contexts.into_iter().collect();

    let mut lines: Vec<Vec<RenderingContext<'a>>> = Vec::new();
    let mut current: Vec<RenderingContext<'a>> = Vec::new();
    let mut cursor_line = None;

    let mut position = 0;
    while position < contexts.len() {
        // Length of the word starting here, separator included
        let word_len = contexts[position..]
            .iter()
            .position(|context| context.slot.compare == crate::SEPARATOR)
            .map_or(contexts.len() - position, |offset| offset + 1);

        if !current.is_empty() && current.len() + word_len > line_length {
            lines.push(std::mem::take(&mut current));
        }

        for context in &contexts[position..position + word_len] {
            if current.len() >= line_length {
                lines.push(std::mem::take(&mut current));
            }
            if context.has_cursor {
                cursor_line = Some(lines.len());
            }
            current.push(*context);
        }

        position += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    // A cursor past the last slot sits on the last line
    let cursor_line = cursor_line.unwrap_or(lines.len().saturating_sub(1)) as isize;

    lines
        .into_iter()
        .enumerate()
        .map(|(index, contents)| LineContext {
            active_line_offset: index as isize - cursor_line,
            contents,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_texts(lines: &[LineContext]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.contents.iter().map(|ctx| ctx.slot.raw).collect())
            .collect()
    }

    #[test]
    fn test_iterator_marks_cursor_and_current_word() {
        let buffer = TextBuffer::from_text("cat dog ");
        let contexts: Vec<_> = RenderingIterator::new(&buffer, 2).collect();

        assert_eq!(contexts.len(), 8);
        assert!(contexts[2].has_cursor);
        assert_eq!(contexts.iter().filter(|ctx| ctx.has_cursor).count(), 1);

        let current: Vec<usize> = contexts
            .iter()
            .filter(|ctx| ctx.in_current_word)
            .map(|ctx| ctx.index)
            .collect();
        assert_eq!(current, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_current_word_extends_to_overrun_cursor() {
        let buffer = TextBuffer::from_text("ab cd ");
        let contexts: Vec<_> = RenderingIterator::new(&buffer, 5).collect();

        assert_eq!(contexts.iter().filter(|ctx| ctx.in_current_word).count(), 5);
    }

    #[test]
    fn test_exact_size() {
        let buffer = TextBuffer::from_text("neon ");
        let mut iter = RenderingIterator::new(&buffer, 0);

        assert_eq!(iter.len(), 5);
        iter.next();
        assert_eq!(iter.len(), 4);
    }

    #[test]
    fn test_wrap_lines_breaks_between_words() {
        let buffer = TextBuffer::from_text("neon flux grid wave ");
        let lines = wrap_lines(RenderingIterator::new(&buffer, 6), LineRenderConfig::new(10));

        assert_eq!(line_texts(&lines), vec!["neon flux ", "grid wave "]);
        assert_eq!(lines[0].active_line_offset, 0);
        assert_eq!(lines[1].active_line_offset, 1);
    }

    #[test]
    fn test_wrap_lines_offsets_follow_cursor() {
        let buffer = TextBuffer::from_text("neon flux grid wave ");
        let lines = wrap_lines(RenderingIterator::new(&buffer, 12), LineRenderConfig::new(10));

        assert_eq!(lines[0].active_line_offset, -1);
        assert_eq!(lines[1].active_line_offset, 0);
    }

    #[test]
    fn test_wrap_lines_splits_long_words() {
        let buffer = TextBuffer::from_text("encryption ");
        let lines = wrap_lines(RenderingIterator::new(&buffer, 0), LineRenderConfig::new(4));

        assert_eq!(line_texts(&lines), vec!["encr", "ypti", "on "]);
    }
}
