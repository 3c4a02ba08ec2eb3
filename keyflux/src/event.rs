use std::ops::Range;

/// Feedback published by the engine for the presentation layer
///
/// The engine never calls rendering, audio or animation code. It queues one of these for every
/// observable outcome and the front end drains them with
/// [`GameSession::drain_events`](crate::GameSession::drain_events).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keystroke matched the expected character
    CorrectHit(char),
    /// A keystroke did not match the expected character
    WrongHit(char),
    /// The last typed slot was retracted with backspace
    Retracted,
    /// The combo reached a multiple of ten above ten
    ComboMilestone(u32),
    /// The current word was committed
    WordSuccess,
    /// The separator was pressed on an unfinished or misspelled word. Covers the slots of the
    /// word so far, separator position included.
    WordFail(Range<usize>),
    /// One second of the countdown has passed
    Tick { remaining: u32, limit: u32 },
    /// The countdown reached zero
    GameOver { wpm: u32, accuracy: u32 },
}

impl Event {
    /// Remaining time as a percentage of the limit, for `Tick` events
    pub fn progress(&self) -> Option<f64> {
        match self {
            Self::Tick { remaining, limit } if *limit > 0 => {
                Some(f64::from(*remaining) / f64::from(*limit) * 100.0)
            }
            _ => None,
        }
    }

    /// Returns true for events caused by a mistake
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::WrongHit(_) | Self::WordFail(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_progress() {
        let tick = Event::Tick {
            remaining: 15,
            limit: 60,
        };
        assert_eq!(tick.progress(), Some(25.0));

        let done = Event::Tick {
            remaining: 0,
            limit: 60,
        };
        assert_eq!(done.progress(), Some(0.0));

        assert_eq!(Event::WordSuccess.progress(), None);
    }

    #[test]
    fn test_is_error() {
        assert!(Event::WrongHit('x').is_error());
        assert!(Event::WordFail(0..3).is_error());
        assert!(!Event::CorrectHit('a').is_error());
        assert!(!Event::Retracted.is_error());
    }
}
