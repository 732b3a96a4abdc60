use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, warn};

use crate::ai::HeuristicAi;
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{GameSession, Outcome};

/// Who plays the second side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    VsHuman,
    VsAi,
}

enum Screen {
    ModeSelect,
    Playing(GameSession),
}

pub struct App {
    width: usize,
    height: usize,
    ai: HeuristicAi,
    ai_delay: Duration,
    screen: Screen,
    selected_column: usize,
    /// When the pending computer move should be applied
    ai_due: Option<Instant>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let ai = match config.ai.seed {
            Some(seed) => HeuristicAi::seeded(seed),
            None => HeuristicAi::new(),
        };
        App {
            width: config.game.width,
            height: config.game.height,
            ai,
            ai_delay: Duration::from_millis(config.ai.move_delay_ms),
            screen: Screen::ModeSelect,
            selected_column: config.game.width / 2, // Start in middle
            ai_due: None,
            should_quit: false,
            message: None,
        }
    }

    /// Discard any current game and start a fresh one
    pub fn start(&mut self, mode: Mode) {
        match GameSession::new(self.width, self.height, mode == Mode::VsAi) {
            Ok(session) => {
                debug!(?mode, "starting game");
                self.screen = Screen::Playing(session);
                self.selected_column = self.width / 2;
                self.ai_due = None;
                self.message = Some("New game started!".to_string());
            }
            Err(err) => {
                warn!(%err, "cannot start game");
                self.message = Some(err.to_string());
            }
        }
    }

    pub fn session(&self) -> Option<&GameSession> {
        match &self.screen {
            Screen::Playing(session) => Some(session),
            Screen::ModeSelect => None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Handle keyboard events, waking early if a computer move falls due
    fn handle_events(&mut self) -> io::Result<()> {
        let mut timeout = Duration::from_millis(100);
        if let Some(due) = self.ai_due {
            timeout = timeout.min(due.saturating_duration_since(Instant::now()));
        }
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Apply the pending computer move once its delay has passed
    fn tick(&mut self, now: Instant) {
        let Some(due) = self.ai_due else {
            return;
        };
        if now < due {
            return;
        }
        self.ai_due = None;

        let Screen::Playing(session) = &self.screen else {
            return;
        };
        let Some(side) = session.current_side() else {
            return;
        };
        match self.ai.choose_column(session.board(), side) {
            Some(column) => self.apply(column),
            None => warn!("computer found no legal move"),
        }
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ if matches!(self.screen, Screen::ModeSelect) => match key.code {
                KeyCode::Char('h') => self.start(Mode::VsHuman),
                KeyCode::Char('a') => self.start(Mode::VsAi),
                _ => {}
            },
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                // Reset: the session is discarded, pick a mode again
                self.screen = Screen::ModeSelect;
                self.ai_due = None;
            }
            _ => {}
        }
    }

    /// Drop the human's piece in the selected column
    fn drop_piece(&mut self) {
        let Some(session) = self.session() else {
            return;
        };
        if session.is_finished() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if session.is_ai_turn() {
            return;
        }
        self.apply(self.selected_column);
    }

    fn apply(&mut self, column: usize) {
        let Screen::Playing(session) = &mut self.screen else {
            return;
        };

        match session.apply_move(column) {
            Ok(Outcome::InProgress) => {
                if session.is_ai_turn() {
                    self.ai_due = Some(Instant::now() + self.ai_delay);
                }
            }
            Ok(Outcome::Win(side)) => {
                self.message = Some(format!(
                    "{} won! Press 'r' to play again.",
                    session.player_label(side)
                ));
            }
            Ok(Outcome::Tie) => {
                self.message = Some("You Tied! Press 'r' to play again.".to_string());
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::ColumnOutOfRange { .. }) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        match &self.screen {
            Screen::ModeSelect => super::game_view::render_menu(frame, &self.message),
            Screen::Playing(session) => super::game_view::render(
                frame,
                session,
                self.selected_column,
                &self.message,
                self.ai_due.is_some(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    use crate::game::{Cell, Side, Status};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn test_app() -> App {
        let mut config = AppConfig::default();
        config.ai.move_delay_ms = 0;
        config.ai.seed = Some(9);
        App::new(&config)
    }

    #[test]
    fn starts_on_mode_menu() {
        let mut app = test_app();
        assert!(app.session().is_none());

        // Game keys do nothing until a mode is picked
        press(&mut app, KeyCode::Enter);
        assert!(app.session().is_none());

        press(&mut app, KeyCode::Char('h'));
        let session = app.session().unwrap();
        assert_eq!(session.ai_side(), None);
    }

    #[test]
    fn human_drop_uses_selected_column() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);

        let board = app.session().unwrap().board();
        assert_eq!(board.get(5, 1), Cell::Occupied(Side::First));
    }

    #[test]
    fn cursor_stays_on_board() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('h'));
        for _ in 0..20 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column, 6);
        for _ in 0..20 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn computer_replies_after_delay() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        let session = app.session().unwrap();
        assert_eq!(session.status(), Status::AwaitingMove(Side::Second));
        assert!(app.ai_due.is_some());

        // Human input is ignored while the computer is to move
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().unwrap().history().len(), 1);

        app.tick(Instant::now());
        let session = app.session().unwrap();
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.status(), Status::AwaitingMove(Side::First));
        assert!(app.ai_due.is_none());
    }

    #[test]
    fn full_column_reports_message() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('h'));
        for _ in 0..6 {
            press(&mut app, KeyCode::Enter);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.message.as_deref(), Some("Column is full!"));
        assert_eq!(app.session().unwrap().history().len(), 6);
    }

    #[test]
    fn win_message_and_reset() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('h'));
        // First side stacks column 3, second side plays column 2
        for _ in 0..3 {
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Left);
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Right);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.message.as_deref(),
            Some("Player 1 won! Press 'r' to play again.")
        );

        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.message.as_deref(),
            Some("Game over! Press 'r' to restart.")
        );

        press(&mut app, KeyCode::Char('r'));
        assert!(app.session().is_none());
    }

    #[test]
    fn quit_from_any_screen() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
