//! Run detection: does a side hold `length` contiguous pieces in a line?

use super::board::Board;
use super::moves::Move;
use super::side::Side;

/// Run length that wins the game.
pub const WIN_LENGTH: usize = 4;

/// Horizontal, vertical, diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// True if `side` has a run of `length` anywhere on the board.
///
/// Scans every cell as a potential run start in each direction, so it does
/// not need to know where the last piece landed.
pub fn has_run(board: &Board, side: Side, length: usize) -> bool {
    for row in 0..board.height() as isize {
        for col in 0..board.width() as isize {
            for (dr, dc) in DIRECTIONS {
                let hit = (0..length as isize)
                    .all(|i| board.is_side_at(row + dr * i, col + dc * i, side));
                if hit {
                    return true;
                }
            }
        }
    }
    false
}

/// True if the piece at `(row, col)` belongs to `side` and is part of a run
/// of at least `length` in some direction.
pub fn has_run_through(board: &Board, row: usize, col: usize, side: Side, length: usize) -> bool {
    let (row, col) = (row as isize, col as isize);
    if !board.is_side_at(row, col, side) {
        return false;
    }

    DIRECTIONS.iter().any(|&(dr, dc)| {
        let mut count = 1; // Count the piece itself

        let mut step = 1;
        while board.is_side_at(row + dr * step, col + dc * step, side) {
            count += 1;
            step += 1;
        }

        let mut step = 1;
        while board.is_side_at(row - dr * step, col - dc * step, side) {
            count += 1;
            step += 1;
        }

        count >= length
    })
}

/// True if placing `side` at `mv` would put that piece in a run of `length`.
pub fn completes_run(board: &Board, mv: Move, side: Side, length: usize) -> bool {
    let next = board.with_piece(mv, side);
    has_run_through(&next, mv.row(), mv.column(), side, length)
}
