//! # Score Module - Speed and Accuracy
//!
//! Both calculations are total: zero elapsed time and zero keystrokes produce a score of zero
//! instead of a division error.

use crate::input_handler::Counters;
use crate::{AVERAGE_WORD_LENGTH, Seconds, minutes};

/// Words per minute, using the five-characters-per-word convention.
///
/// * `correct` - Correct keystrokes plus committed words
/// * `elapsed_seconds` - Time the counters were collected over
///
/// Returns 0 when no time has elapsed.
pub fn wpm(correct: u32, elapsed_seconds: Seconds) -> u32 {
    if elapsed_seconds <= 0.0 {
        return 0;
    }

    let words = f64::from(correct) / f64::from(AVERAGE_WORD_LENGTH);
    (words / minutes(elapsed_seconds)).round() as u32
}

/// Accuracy as a whole percentage between 0 and 100.
///
/// Returns 0 when nothing has been typed.
pub fn accuracy(correct: u32, total: u32) -> u32 {
    (f64::from(correct) * 100.0 / f64::from(total.max(1))).round() as u32
}

/// A computed score
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub wpm: u32,
    /// Percentage, 0 - 100
    pub accuracy: u32,
}

impl Score {
    /// Score the counters over `elapsed_seconds`
    pub fn calculate(counters: &Counters, elapsed_seconds: Seconds) -> Self {
        Self {
            wpm: wpm(counters.correct, elapsed_seconds),
            accuracy: accuracy(counters.correct, counters.total),
        }
    }

    /// Score at the end of a game. The whole time limit is the divisor.
    pub fn at_timeout(counters: &Counters, time_limit_seconds: u32) -> Self {
        Self::calculate(counters, f64::from(time_limit_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wpm() {
        // 25 correct in 30 seconds: 5 words in half a minute
        assert_eq!(wpm(25, 30.0), 10);
        // 300 characters in a minute
        assert_eq!(wpm(300, 60.0), 60);
        // Rounds to nearest
        assert_eq!(wpm(7, 60.0), 1);
        assert_eq!(wpm(8, 60.0), 2);
    }

    #[test]
    fn test_wpm_without_elapsed_time() {
        assert_eq!(wpm(100, 0.0), 0);
        assert_eq!(wpm(0, 0.0), 0);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(8, 10), 80);
        assert_eq!(accuracy(10, 10), 100);
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(0, 0), 0);
        assert_eq!(accuracy(0, 5), 0);
    }

    #[test]
    fn test_score_at_timeout_uses_full_limit() {
        let counters = Counters {
            correct: 50,
            total: 60,
            combo: 3,
        };

        let score = Score::at_timeout(&counters, 60);

        assert_eq!(
            score,
            Score {
                wpm: 10,
                accuracy: 83
            }
        );
    }
}
