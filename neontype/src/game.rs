use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use keyflux::config::next_time_preset;
use keyflux::render::{LineRenderConfig, RenderingContext};
use keyflux::timer::{CountdownToken, Scheduler};
use keyflux::{Difficulty, GameSession, Key, Phase, SlotState, WordSource};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Clear, Gauge, Paragraph},
};
use tracing::{debug, warn};
use web_time::Instant;

use crate::app::Message;
use crate::config::{Settings, Theme};
use crate::error::AppError;
use crate::feedback::{Feedback, FlashKind};
use crate::utils::{KeyEventHelper, ROUNDED_BLOCK, center, format_clock};

const HELP: &str = "<TAB> difficulty  <CTRL-T> time  <CTRL-R> restart  <ESC> quit";

/// Below this share of time left the gauge changes color
const LOW_TIME_PERCENT: f64 = 25.0;

/// The typing screen
#[derive(Debug)]
pub struct Game {
    session: GameSession,
    feedback: Feedback,
    /// Remaining time in percent, as of the last tick
    progress: f64,
}

impl Game {
    pub fn new(settings: &Settings, scheduler: impl Scheduler + 'static) -> Result<Self, AppError> {
        let words = settings
            .seed
            .map_or_else(WordSource::from_entropy, WordSource::seeded);
        let session = GameSession::new(settings.configuration()?, words, scheduler);

        Ok(Self {
            session,
            feedback: Feedback::new(Duration::from_millis(settings.flash_millis), settings.bell),
            progress: 100.0,
        })
    }

    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    /// Route one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if !key.is_press() {
            return None;
        }

        let config = *self.session.config();

        if key.is_ctrl_press_char('q') || key.code == KeyCode::Esc {
            return Some(Message::Quit);
        } else if key.is_ctrl_press_char('r') {
            self.restart();
        } else if key.is_ctrl_press_char('t') {
            let limit = next_time_preset(config.time_limit_seconds());
            self.reconfigure(config.difficulty(), limit);
        } else if key.code == KeyCode::Tab {
            self.reconfigure(config.difficulty().cycle(), config.time_limit_seconds());
        } else if key.code == KeyCode::Enter {
            if self.session.phase() == Phase::Over {
                self.restart();
            }
        } else {
            let key = match key.code {
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Char(c)
                    if !key.has_mods(KeyModifiers::CONTROL) && !key.has_mods(KeyModifiers::ALT) =>
                {
                    Key::from(c)
                }
                _ => return None,
            };

            self.session.submit(key);
            return self.process_events().then_some(Message::Bell);
        }

        None
    }

    /// Feed a countdown tick to the session
    pub fn on_tick(&mut self, token: CountdownToken) {
        self.session.on_tick(token);
        self.process_events();
    }

    fn restart(&mut self) {
        self.session.restart();
        self.after_reset();
    }

    fn reconfigure(&mut self, difficulty: Difficulty, time_limit: u32) {
        if let Err(error) = self.session.configure(difficulty, time_limit) {
            warn!("Rejected configuration: {error}");
            return;
        }
        self.after_reset();
    }

    fn after_reset(&mut self) {
        self.feedback.clear();
        self.progress = 100.0;
        debug!(config = ?self.session.config(), "New game");
    }

    // Returns true if the bell should ring
    fn process_events(&mut self) -> bool {
        let now = Instant::now();
        let mut ring = false;

        for event in self.session.drain_events() {
            if let Some(progress) = event.progress() {
                self.progress = progress;
            }
            ring |= self.feedback.apply(&event, now);
        }

        ring
    }
}

// Rendering logic
impl Game {
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let now = Instant::now();

        let [stats_area, gauge_area, _, text_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(self.stats_line(theme, now).centered(), stats_area);
        frame.render_widget(self.gauge(theme), gauge_area);
        self.render_text(frame, text_area, theme, now);
        frame.render_widget(Line::raw(HELP).dim().centered(), help_area);

        if self.session.phase() == Phase::Over {
            self.render_game_over(frame, area, theme);
        }
    }

    pub fn render_top(&self) -> Line<'static> {
        let config = self.session.config();
        Line::raw(format!(
            "{} · {}",
            config.difficulty(),
            format_clock(config.time_limit_seconds())
        ))
    }

    fn stats_line(&self, theme: &Theme, now: Instant) -> Line<'_> {
        let score = self.session.live_score();

        let combo_style = if self.feedback.is_active(FlashKind::Milestone, now) {
            Style::new().fg(theme.text.accent).bold().reversed()
        } else {
            Style::new().bold()
        };

        Line::from(vec![
            Span::raw("WPM "),
            Span::raw(score.wpm.to_string()).bold(),
            Span::raw(" │ ACC "),
            Span::raw(format!("{}%", score.accuracy)).bold(),
            Span::raw(" │ COMBO "),
            Span::styled(self.session.combo().to_string(), combo_style),
            Span::raw(" │ "),
            Span::raw(format_clock(self.session.remaining())).bold(),
        ])
    }

    fn gauge(&self, theme: &Theme) -> Gauge<'_> {
        let color = if self.progress < LOW_TIME_PERCENT {
            theme.frame.gauge_low
        } else {
            theme.frame.gauge
        };

        Gauge::default()
            .gauge_style(Style::new().fg(color))
            .ratio((self.progress / 100.0).clamp(0.0, 1.0))
            .label(format_clock(self.session.remaining()))
    }

    fn render_text(&self, frame: &mut Frame, area: Rect, theme: &Theme, now: Instant) {
        let border = if self.feedback.is_active(FlashKind::Error, now) {
            theme.text.wrong
        } else if self.feedback.is_active(FlashKind::Success, now) {
            theme.text.accent
        } else {
            theme.frame.border
        };

        let block = ROUNDED_BLOCK.border_style(Style::new().fg(border));
        let inner = block.inner(area);
        let failed = self.feedback.failed_word(now);

        // The cursor line is always the first one shown
        let lines = self.session.render_lines(
            |line| {
                if line.active_line_offset < 0 {
                    return None;
                }

                Some(
                    line.contents
                        .iter()
                        .map(|ctx| {
                            let failed = failed.is_some_and(|range| range.contains(&ctx.index));
                            Span::styled(ctx.slot.raw.to_string(), slot_style(ctx, failed, theme))
                        })
                        .collect::<Line>(),
                )
            },
            LineRenderConfig::new(inner.width.into()),
        );

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_game_over(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(score) = self.session.final_score() else {
            return;
        };

        let popup = center(area, Constraint::Length(34), Constraint::Length(8));
        let block = ROUNDED_BLOCK
            .border_style(Style::new().fg(theme.text.accent))
            .title_top(Line::raw("GAME OVER").bold().centered());

        let text = vec![
            Line::raw(""),
            Line::from(vec![
                Span::raw("WPM "),
                Span::raw(score.wpm.to_string()).bold().fg(theme.text.accent),
            ]),
            Line::from(vec![
                Span::raw("Accuracy "),
                Span::raw(format!("{}%", score.accuracy)).bold().fg(theme.text.accent),
            ]),
            Line::raw(""),
            Line::raw("<ENTER> to play again").dim(),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(text).centered().block(block), popup);
    }
}

fn slot_style(ctx: &RenderingContext, failed: bool, theme: &Theme) -> Style {
    if ctx.has_cursor {
        return Style::new().fg(theme.cursor.text).bg(theme.cursor.color);
    }

    let is_space = ctx.slot.compare == ' ';
    let mut style = match ctx.slot.state {
        SlotState::Untyped => Style::new().fg(theme.text.untyped),
        SlotState::Correct => Style::new().fg(theme.text.correct),
        SlotState::Wrong if is_space => Style::new().bg(theme.text.wrong),
        SlotState::Wrong => Style::new().fg(theme.text.wrong),
    };

    if ctx.in_current_word {
        style = style.bold();
    }

    if failed {
        style = style.underlined().underline_color(theme.text.wrong);
    }

    style
}
