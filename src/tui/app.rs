//! Application state for the terminal UI.
//!
//! The app never changes the session itself. It keeps the latest published
//! session for rendering and turns key presses into intents.

use super::input::move_cursor;
use crate::bridge::UiIntent;
use crate::games::tictactoe::{Position, Winner};
use crate::session::{Session, SessionStatus};
use crossterm::event::KeyCode;
use tracing::debug;

/// Main application state.
#[derive(Debug)]
pub struct App {
    session: Session,
    cursor: Position,
}

impl App {
    /// Creates a new application.
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            cursor: Position::Center,
        }
    }

    /// Latest session received from the bridge.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Cell the cursor highlights.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Replaces the displayed session.
    pub fn update_session(&mut self, session: Session) {
        self.session = session;
    }

    /// Maps a key press to an intent, moving the cursor as needed.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<UiIntent> {
        let intent = match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(UiIntent::Quit),
            KeyCode::Char('r') => Some(UiIntent::Reset),
            KeyCode::Char('s') if *self.session.status() == SessionStatus::Connected => {
                Some(UiIntent::StartGame)
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(UiIntent::MakeMove(self.cursor)),
            KeyCode::Char(c) => Position::from_key(c).map(|position| {
                self.cursor = position;
                UiIntent::MakeMove(position)
            }),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
                None
            }
            _ => None,
        };

        debug!(?key, ?intent, "Handled key");
        intent
    }

    /// One-line description of where the game stands.
    pub fn status_message(&self) -> String {
        let session = &self.session;
        match session.status() {
            SessionStatus::NotConnected => "Connecting...".to_string(),
            SessionStatus::Connected => "Connected. Press 's' to start a game.".to_string(),
            SessionStatus::WaitingForOpponent => "Waiting for an opponent...".to_string(),
            SessionStatus::InProgress => match (session.player_symbol(), session.current_turn()) {
                (Some(me), Some(_)) if session.is_my_turn() => {
                    format!("Your turn ({}). Arrows + Enter or 1-9 to move.", me)
                }
                (Some(me), Some(turn)) => format!("You are {}. Waiting for {}...", me, turn),
                _ => "Game in progress".to_string(),
            },
            SessionStatus::Completed => {
                let result = match (session.winner(), session.player_symbol()) {
                    (Some(Winner::Draw), _) => "Draw!".to_string(),
                    (Some(winner), Some(me)) if *winner == Winner::from(*me) => {
                        "You win!".to_string()
                    }
                    (Some(_), Some(_)) => "You lose.".to_string(),
                    (Some(winner), None) => format!("{} wins!", winner),
                    (None, _) => "Game over.".to_string(),
                };
                format!("{} Press 'r' to play again or 'q' to quit.", result)
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
