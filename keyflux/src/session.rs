//! # Session Module - One Game, End to End
//!
//! [`GameSession`] is the single owned value behind a game. It wires the word source, the rolling
//! buffer, the keystroke classifier, the word committer and the countdown together, and it is
//! the only thing a front end talks to.
//!
//! Every call runs to completion and queues its outcome as [`Event`]s. A front end calls in with
//! a key or a tick, then drains the queue and renders.
//!
//! ## Session Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/session_lifecycle.mmd")]
//!
//! ## Usage Example
//!
//! ```rust
//! use keyflux::timer::ManualScheduler;
//! use keyflux::{Configuration, Difficulty, Event, GameSession, Phase, WordSource};
//!
//! let scheduler = ManualScheduler::default();
//! let config = Configuration::new(Difficulty::Easy, 2, 10).unwrap();
//! let mut session = GameSession::new(config, WordSource::seeded(1), scheduler.clone());
//!
//! // The first accepted key starts the countdown
//! let first = session.buffer().compare_at(0).unwrap();
//! session.submit_key(&first.to_string());
//! assert_eq!(session.phase(), Phase::Running);
//!
//! let token = scheduler.last_token().unwrap();
//! session.on_tick(token);
//! session.on_tick(token);
//!
//! assert_eq!(session.phase(), Phase::Over);
//! let events: Vec<Event> = session.drain_events().collect();
//! assert!(matches!(events.last(), Some(Event::GameOver { .. })));
//! ```

use std::collections::VecDeque;
use std::collections::vec_deque::Drain;

use tracing::{debug, info};

use crate::buffer::TextBuffer;
use crate::committer::submit_separator;
use crate::config::Configuration;
use crate::input_handler::{Counters, InputHandler};
use crate::render::{LineContext, LineRenderConfig, RenderingIterator, wrap_lines};
use crate::score::Score;
use crate::timer::{Countdown, CountdownToken, Scheduler, TickOutcome};
use crate::{Difficulty, Event, Key, Result, WordSource};

/// Where a session is in its lifecycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reset and waiting for the first keystroke
    #[default]
    NotStarted,
    /// The countdown is ticking
    Running,
    /// The countdown reached zero. Input is ignored until a restart.
    Over,
}

/// A complete typing game
#[derive(Debug)]
pub struct GameSession {
    config: Configuration,
    buffer: TextBuffer,
    input: InputHandler,
    counters: Counters,
    countdown: Countdown,
    phase: Phase,
    words: WordSource,
    scheduler: Box<dyn Scheduler>,
    events: VecDeque<Event>,
    final_score: Option<Score>,
}

impl GameSession {
    /// Create a session ready for its first keystroke
    pub fn new(
        config: Configuration,
        words: WordSource,
        scheduler: impl Scheduler + 'static,
    ) -> Self {
        let mut session = Self {
            config,
            buffer: TextBuffer::new(),
            input: InputHandler::new(),
            counters: Counters::default(),
            countdown: Countdown::new(config.time_limit_seconds()),
            phase: Phase::NotStarted,
            words,
            scheduler: Box::new(scheduler),
            events: VecDeque::new(),
            final_score: None,
        };
        session.reset();
        session
    }

    /// Change difficulty and time limit, then start over.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTimeLimit`](crate::Error::InvalidTimeLimit) for a zero limit. The
    /// session is left untouched in that case.
    pub fn configure(&mut self, difficulty: Difficulty, time_limit_seconds: u32) -> Result<()> {
        self.config = self.config.with(difficulty, time_limit_seconds)?;
        debug!(%difficulty, time_limit_seconds, "Session reconfigured");
        self.reset();
        Ok(())
    }

    /// Start over with the current configuration and fresh words
    pub fn restart(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.countdown.reset(self.config.time_limit_seconds());
        self.buffer.fill(
            &mut self.words,
            self.config.difficulty(),
            self.config.word_count(),
        );
        self.input.rewind();
        self.counters = Counters::default();
        self.phase = Phase::NotStarted;
        self.final_score = None;
        self.events.clear();

        debug!(
            difficulty = %self.config.difficulty(),
            slots = self.buffer.len(),
            "Session reset"
        );
    }

    /// Handle a raw key name such as `"a"`, `" "` or `"Backspace"`
    pub fn submit_key(&mut self, raw: &str) {
        self.submit(Key::parse(raw));
    }

    /// Handle one keystroke
    pub fn submit(&mut self, key: Key) {
        if self.phase == Phase::Over {
            return;
        }

        match key {
            Key::Char(c) => self.type_char(c),
            Key::Separator => self.commit_word(),
            Key::Backspace => {
                if let Some(event) = self.input.retract(&mut self.buffer, &mut self.counters) {
                    self.events.push_back(event);
                }
            }
            Key::Ignored => (),
        }
    }

    fn type_char(&mut self, c: char) {
        let Some(event) = self
            .input
            .process_input(c, &mut self.buffer, &mut self.counters)
        else {
            return;
        };

        if self.phase == Phase::NotStarted {
            self.countdown.start(self.scheduler.as_mut());
            self.phase = Phase::Running;
        }

        let is_hit = matches!(event, Event::CorrectHit(_));
        self.events.push_back(event);

        if is_hit && self.counters.is_milestone() {
            self.events
                .push_back(Event::ComboMilestone(self.counters.combo));
        }
    }

    fn commit_word(&mut self) {
        let difficulty = self.config.difficulty();
        let words = &mut self.words;

        let event = submit_separator(
            &mut self.input,
            &mut self.buffer,
            &mut self.counters,
            || words.next_word(difficulty),
        );

        if let Some(event) = event {
            self.events.push_back(event);
        }
    }

    /// Handle one countdown tick. Ticks from a cancelled countdown are ignored.
    pub fn on_tick(&mut self, token: CountdownToken) {
        let limit = self.config.time_limit_seconds();

        match self.countdown.tick(token) {
            Some(TickOutcome::Running { remaining }) => {
                self.events.push_back(Event::Tick { remaining, limit });
            }
            Some(TickOutcome::Expired) => {
                self.events.push_back(Event::Tick {
                    remaining: 0,
                    limit,
                });
                self.finish();
            }
            None => (),
        }
    }

    fn finish(&mut self) {
        let score = Score::at_timeout(&self.counters, self.config.time_limit_seconds());
        self.phase = Phase::Over;
        self.final_score = Some(score);
        self.events.push_back(Event::GameOver {
            wpm: score.wpm,
            accuracy: score.accuracy,
        });

        info!(
            wpm = score.wpm,
            accuracy = score.accuracy,
            correct = self.counters.correct,
            total = self.counters.total,
            "Game over"
        );
    }

    /// Take every event queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> Drain<'_, Event> {
        self.events.drain(..)
    }

    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub const fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub const fn counters(&self) -> Counters {
        self.counters
    }

    pub const fn combo(&self) -> u32 {
        self.counters.combo
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whole seconds left on the countdown
    pub const fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Token carried by the running countdown's ticks
    pub const fn countdown_token(&self) -> CountdownToken {
        self.countdown.token()
    }

    /// Score over the wall-clock time since the first keystroke.
    ///
    /// Once the game is over this is the final score.
    pub fn live_score(&self) -> Score {
        self.final_score.unwrap_or_else(|| {
            Score::calculate(&self.counters, self.countdown.elapsed_seconds())
        })
    }

    /// The score computed when the countdown expired
    pub const fn final_score(&self) -> Option<Score> {
        self.final_score
    }

    /// Iterate over the buffer with cursor information
    pub fn render_iter(&self) -> RenderingIterator<'_> {
        RenderingIterator::new(&self.buffer, self.input.cursor())
    }

    /// Render the buffer line by line.
    ///
    /// `line_renderer` receives each wrapped line. Returning `None` skips the line.
    pub fn render_lines<Line, F: FnMut(LineContext) -> Option<Line>>(
        &self,
        line_renderer: F,
        config: LineRenderConfig,
    ) -> Vec<Line> {
        wrap_lines(self.render_iter(), config)
            .into_iter()
            .filter_map(line_renderer)
            .collect()
    }
}
