use super::board::Board;

/// The landing cell of a drop. Only boards hand these out, so `row` is always
/// the lowest empty row of `column` at the time the move was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    row: usize,
    column: usize,
}

impl Move {
    pub(crate) fn new(row: usize, column: usize) -> Self {
        Move { row, column }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

/// One move per non-full column, in ascending column order.
pub fn all_moves(board: &Board) -> Vec<Move> {
    (0..board.width())
        .filter_map(|col| board.move_for(col))
        .collect()
}
