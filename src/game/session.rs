use tracing::{debug, info};

use super::board::Board;
use super::moves::{all_moves, Move};
use super::side::Side;
use super::win::{has_run, WIN_LENGTH};
use crate::error::{BoardError, MoveError};

/// Result of the most recent move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Side),
    Tie,
}

/// Where the session stands. `Finished` only ever holds `Win` or `Tie`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    AwaitingMove(Side),
    Finished(Outcome),
}

/// One game from first drop to win or tie. Owns its board exclusively;
/// starting a new game means building a new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    status: Status,
    ai_enabled: bool,
    history: Vec<Move>,
}

impl GameSession {
    /// Create a session on an empty `width` x `height` board. With
    /// `ai_enabled` the second side is played by the computer.
    pub fn new(width: usize, height: usize, ai_enabled: bool) -> Result<Self, BoardError> {
        Ok(Self::with_board(Board::new(width, height)?, ai_enabled))
    }

    /// Create a session on the standard 7x6 board
    pub fn standard(ai_enabled: bool) -> Self {
        Self::with_board(Board::standard(), ai_enabled)
    }

    fn with_board(board: Board, ai_enabled: bool) -> Self {
        debug!(
            width = board.width(),
            height = board.height(),
            ai_enabled,
            "new game session"
        );
        GameSession {
            board,
            status: Status::AwaitingMove(Side::First), // First side starts
            ai_enabled,
            history: Vec::new(),
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Side to move, or `None` once the game is over
    pub fn current_side(&self) -> Option<Side> {
        match self.status {
            Status::AwaitingMove(side) => Some(side),
            Status::Finished(_) => None,
        }
    }

    /// Check if game is over
    pub fn is_finished(&self) -> bool {
        matches!(self.status, Status::Finished(_))
    }

    /// The computer-controlled side, if any
    pub fn ai_side(&self) -> Option<Side> {
        self.ai_enabled.then_some(Side::Second)
    }

    /// True when the game is live and the side to move is the computer
    pub fn is_ai_turn(&self) -> bool {
        self.current_side().is_some() && self.current_side() == self.ai_side()
    }

    /// Display label: "The AI" for the computer side, else the side's name
    pub fn player_label(&self, side: Side) -> &'static str {
        if self.ai_side() == Some(side) {
            "The AI"
        } else {
            side.name()
        }
    }

    /// Moves applied so far, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Columns that accept a drop right now; empty once the game is over
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_finished() {
            return Vec::new();
        }
        all_moves(&self.board).iter().map(|mv| mv.column()).collect()
    }

    /// Drop the side-to-move's piece into `column`.
    ///
    /// The win check and the full-board check both run from scratch on the
    /// new board. A rejected move leaves the session untouched.
    pub fn apply_move(&mut self, column: usize) -> Result<Outcome, MoveError> {
        let side = match self.status {
            Status::AwaitingMove(side) => side,
            Status::Finished(_) => return Err(MoveError::GameOver),
        };

        let mv = self.board.drop_piece(column, side)?;
        self.history.push(mv);

        let outcome = if has_run(&self.board, side, WIN_LENGTH) {
            Outcome::Win(side)
        } else if self.board.is_full() {
            Outcome::Tie
        } else {
            Outcome::InProgress
        };

        debug!(
            side = %side,
            row = mv.row(),
            column = mv.column(),
            ?outcome,
            "move applied"
        );

        self.status = match outcome {
            Outcome::InProgress => Status::AwaitingMove(side.other()),
            finished => {
                info!(?finished, moves = self.history.len(), "game finished");
                Status::Finished(finished)
            }
        };

        Ok(outcome)
    }
}
