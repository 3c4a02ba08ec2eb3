use std::ops::Range;
use std::time::Duration;

use keyflux::Event;
use web_time::Instant;

/// What a flash is reacting to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    /// A wrong keystroke or a rejected word
    Error,
    /// A committed word
    Success,
    /// A combo milestone
    Milestone,
}

const KINDS: usize = 3;

impl FlashKind {
    const fn index(self) -> usize {
        match self {
            Self::Error => 0,
            Self::Success => 1,
            Self::Milestone => 2,
        }
    }
}

/// Short-lived visual reactions to engine events
#[derive(Debug, Clone)]
pub struct Feedback {
    duration: Duration,
    bell: bool,
    until: [Option<Instant>; KINDS],
    failed_word: Option<Range<usize>>,
}

impl Feedback {
    pub const fn new(duration: Duration, bell: bool) -> Self {
        Self {
            duration,
            bell,
            until: [None; KINDS],
            failed_word: None,
        }
    }

    /// React to one event.
    ///
    /// Returns true if the terminal bell should ring.
    pub fn apply(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::WrongHit(_) => self.flash(FlashKind::Error, now),
            Event::WordFail(range) => {
                self.flash(FlashKind::Error, now);
                self.failed_word = Some(range.clone());
            }
            Event::WordSuccess => {
                self.flash(FlashKind::Success, now);
                self.failed_word = None;
            }
            Event::ComboMilestone(_) => self.flash(FlashKind::Milestone, now),
            _ => (),
        }

        self.bell && event.is_error()
    }

    fn flash(&mut self, kind: FlashKind, now: Instant) {
        self.until[kind.index()] = Some(now + self.duration);
    }

    /// Returns true while a flash of `kind` is visible
    pub fn is_active(&self, kind: FlashKind, now: Instant) -> bool {
        self.until[kind.index()].is_some_and(|until| now < until)
    }

    /// Slots of the last rejected word while its flash is visible
    pub fn failed_word(&self, now: Instant) -> Option<&Range<usize>> {
        self.failed_word
            .as_ref()
            .filter(|_| self.is_active(FlashKind::Error, now))
    }

    /// Drop every flash
    pub fn clear(&mut self) {
        self.until = [None; KINDS];
        self.failed_word = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLASH: Duration = Duration::from_millis(150);

    #[test]
    fn test_flash_expires() {
        let mut feedback = Feedback::new(FLASH, false);
        let now = Instant::now();

        feedback.apply(&Event::WordSuccess, now);

        assert!(feedback.is_active(FlashKind::Success, now));
        assert!(!feedback.is_active(FlashKind::Error, now));
        assert!(!feedback.is_active(FlashKind::Success, now + FLASH));
    }

    #[test]
    fn test_failed_word_range() {
        let mut feedback = Feedback::new(FLASH, false);
        let now = Instant::now();

        feedback.apply(&Event::WordFail(0..4), now);
        assert_eq!(feedback.failed_word(now), Some(&(0..4)));
        assert_eq!(feedback.failed_word(now + FLASH), None);

        feedback.apply(&Event::WordFail(0..2), now);
        feedback.apply(&Event::WordSuccess, now);
        assert_eq!(feedback.failed_word(now), None);
    }

    #[test]
    fn test_bell_only_on_mistakes_when_enabled() {
        let now = Instant::now();

        let mut quiet = Feedback::new(FLASH, false);
        assert!(!quiet.apply(&Event::WrongHit('x'), now));

        let mut loud = Feedback::new(FLASH, true);
        assert!(loud.apply(&Event::WrongHit('x'), now));
        assert!(loud.apply(&Event::WordFail(0..1), now));
        assert!(!loud.apply(&Event::CorrectHit('a'), now));
        assert!(!loud.apply(&Event::ComboMilestone(20), now));
    }

    #[test]
    fn test_clear() {
        let mut feedback = Feedback::new(FLASH, false);
        let now = Instant::now();

        feedback.apply(&Event::ComboMilestone(30), now);
        feedback.clear();

        assert!(!feedback.is_active(FlashKind::Milestone, now));
    }
}
