//! Core Connect Four game logic: board, sides, run detection, move
//! enumeration, and the session state machine.

mod board;
pub mod moves;
mod session;
mod side;
pub mod win;

pub use board::{Board, Cell, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION};
pub use moves::{all_moves, Move};
pub use session::{GameSession, Outcome, Status};
pub use side::Side;
pub use win::{has_run, WIN_LENGTH};
