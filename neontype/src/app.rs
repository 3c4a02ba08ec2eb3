use std::io::{Write, stdout};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{self, Event};
use crossterm::execute;
use keyflux::timer::CountdownToken;
use ratatui::{Frame, style::Stylize, text::ToLine, widgets::Padding};
use tracing::{debug, info};

use crate::config::Theme;
use crate::game::Game;
use crate::utils::ROUNDED_BLOCK;

/// How long to wait for terminal input before checking ticks and redrawing
const FRAME: Duration = Duration::from_millis(16);

/// An app message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Ring the terminal bell
    Bell,
    /// Quit the application
    Quit,
}

/// The app itself
#[derive(Debug)]
pub struct App {
    game: Game,
    theme: Theme,
    ticks: Receiver<CountdownToken>,
}

impl App {
    /// Creates a new `App`. `ticks` receives the countdown ticks of the game's scheduler.
    pub const fn new(game: Game, theme: Theme, ticks: Receiver<CountdownToken>) -> Self {
        Self { game, theme, ticks }
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();

        execute!(stdout(), SetCursorStyle::SteadyBar)?;
        info!("Terminal ready");

        let result = self.event_loop(&mut terminal);

        ratatui::restore();

        result
    }

    fn event_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> std::io::Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            self.drain_ticks();

            let event = event::poll(FRAME)?.then(event::read).transpose()?;
            match self.handle_event(event) {
                Some(Message::Quit) => break,
                Some(Message::Bell) => {
                    let mut out = stdout();
                    out.write_all(b"\x07")?;
                    out.flush()?;
                }
                None => (),
            }
        }

        info!(counters = ?self.game.session().counters(), "Quit");
        Ok(())
    }

    /// Hand every tick that arrived since the last frame to the game
    fn drain_ticks(&mut self) {
        loop {
            match self.ticks.try_recv() {
                Ok(token) => self.game.on_tick(token),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("Tick channel closed");
                    break;
                }
            }
        }
    }

    /// Draws the next frame
    fn draw(&self, frame: &mut Frame) {
        let block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .border_style(self.theme.frame.border)
            .title_top(self.game.render_top())
            .title_top("NEONTYPE".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned());

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.game.render(frame, content, &self.theme);
    }

    /// Global event handler
    fn handle_event(&mut self, event: Option<Event>) -> Option<Message> {
        match event? {
            Event::Key(key) => self.game.handle_key(key),
            _ => None, // Resizes are picked up by the next draw
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use keyflux::Phase;
    use keyflux::timer::ManualScheduler;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::config::Settings;

    fn app() -> (App, mpsc::Sender<CountdownToken>, ManualScheduler) {
        let scheduler = ManualScheduler::default();
        let settings = Settings {
            seed: Some(1),
            time_limit: 2,
            ..Settings::default()
        };
        let game = Game::new(&settings, scheduler.clone()).unwrap();
        let (tx, rx) = mpsc::channel();
        (App::new(game, Theme::default(), rx), tx, scheduler)
    }

    #[test]
    fn test_draw_frames_the_game() {
        let (app, _tx, _) = app();
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();

        terminal.draw(|frame| app.draw(frame)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("NEONTYPE"));
        assert!(screen.contains("<CTRL-Q> to exit"));
        assert!(screen.contains("easy · 0:02"));
        assert!(screen.contains("WPM"));
    }

    #[test]
    fn test_ticks_are_forwarded() {
        let (mut app, tx, scheduler) = app();

        app.handle_event(Some(Event::Key(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        ))));
        let token = scheduler.last_token().unwrap();

        tx.send(token).unwrap();
        tx.send(token).unwrap();
        app.drain_ticks();

        assert_eq!(app.game.session().phase(), Phase::Over);
    }

    #[test]
    fn test_quit() {
        let (mut app, _tx, _) = app();

        let quit = app.handle_event(Some(Event::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::CONTROL,
        ))));

        assert_eq!(quit, Some(Message::Quit));
        assert_eq!(app.handle_event(None), None);
        assert_eq!(app.handle_event(Some(Event::Resize(10, 10))), None);
    }
}
