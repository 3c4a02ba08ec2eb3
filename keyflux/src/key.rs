use crate::SEPARATOR;

/// A keystroke as the engine understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character other than the separator
    Char(char),
    /// The word-boundary key
    Separator,
    /// Retract the last typed character
    Backspace,
    /// Anything else (modifiers, function keys, named keys). Never changes state.
    Ignored,
}

impl Key {
    /// Parse a raw key name, as reported by a browser or terminal.
    ///
    /// `"Backspace"` retracts, a single space is the separator, any other single character is
    /// typed, and everything else (`"Shift"`, `"Enter"`, `"F5"`, …) is ignored.
    pub fn parse(raw: &str) -> Self {
        if raw == "Backspace" {
            return Self::Backspace;
        }

        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from(c),
            _ => Self::Ignored,
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        if c == SEPARATOR {
            Self::Separator
        } else if c.is_control() {
            Self::Ignored
        } else {
            Self::Char(c)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Key::parse("a"), Key::Char('a'));
        assert_eq!(Key::parse("Q"), Key::Char('Q'));
        assert_eq!(Key::parse(","), Key::Char(','));
        assert_eq!(Key::parse(" "), Key::Separator);
        assert_eq!(Key::parse("Backspace"), Key::Backspace);
        assert_eq!(Key::parse("Shift"), Key::Ignored);
        assert_eq!(Key::parse("Enter"), Key::Ignored);
        assert_eq!(Key::parse(""), Key::Ignored);
        assert_eq!(Key::parse("\t"), Key::Ignored);
    }
}
