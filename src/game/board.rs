use super::moves::Move;
use super::side::Side;
use crate::error::{BoardError, MoveError};

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;
/// Largest width or height a board may have.
pub const MAX_DIMENSION: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Side),
}

/// A drop-piece grid. Row 0 is the top, row `height - 1` is the bottom.
///
/// Pieces never float: a cell is only occupied if every cell below it in the
/// same column is occupied. The only mutation is placing a piece on the
/// landing cell of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    /// Create an empty 7x6 board
    pub fn standard() -> Self {
        Board {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cells: vec![Cell::Empty; DEFAULT_WIDTH * DEFAULT_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// True if `(row, col)` is on the board and holds a piece of `side`.
    /// Takes signed coordinates so direction walks can step off the edge.
    pub(crate) fn is_side_at(&self, row: isize, col: isize, side: Side) -> bool {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return false;
        }
        self.get(row as usize, col as usize) == Cell::Occupied(side)
    }

    /// Lowest empty row in `col`, or `None` if the column is full or off the board
    pub fn drop_target(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// The move a drop into `col` would make, if the column has room
    pub fn move_for(&self, col: usize) -> Option<Move> {
        self.drop_target(col).map(|row| Move::new(row, col))
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        self.drop_target(col).is_none()
    }

    /// Number of pieces stacked in `col`
    pub fn column_height(&self, col: usize) -> usize {
        (0..self.height)
            .filter(|&row| self.get(row, col) != Cell::Empty)
            .count()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// Mark the landing cell of `mv` as occupied by `side`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is off the board, already occupied, or has an empty
    /// cell beneath it. Moves obtained from this board's current state never
    /// trip these checks.
    pub fn place(&mut self, mv: Move, side: Side) {
        let (row, col) = (mv.row(), mv.column());
        assert!(
            row < self.height && col < self.width,
            "move ({row}, {col}) is off a {}x{} board",
            self.width,
            self.height
        );
        assert_eq!(
            self.get(row, col),
            Cell::Empty,
            "cell ({row}, {col}) is already occupied"
        );
        assert!(
            row + 1 == self.height || self.get(row + 1, col) != Cell::Empty,
            "piece at ({row}, {col}) would float"
        );
        let idx = self.index(row, col);
        self.cells[idx] = Cell::Occupied(side);
    }

    /// Drop a piece in a column, returns the move that was made
    pub fn drop_piece(&mut self, col: usize, side: Side) -> Result<Move, MoveError> {
        if col >= self.width {
            return Err(MoveError::ColumnOutOfRange {
                column: col,
                width: self.width,
            });
        }
        let mv = self.move_for(col).ok_or(MoveError::ColumnFull(col))?;
        self.place(mv, side);
        Ok(mv)
    }

    /// Independent copy for look-ahead; mutating it never touches `self`
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    /// Snapshot with `side` placed at `mv`
    pub fn with_piece(&self, mv: Move, side: Side) -> Board {
        let mut next = self.snapshot();
        next.place(mv, side);
        next
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(row < self.height && col < self.width, "cell ({row}, {col}) out of bounds");
        row * self.width + col
    }

    /// Build a board from text rows, top row first. `X` is the first side,
    /// `O` the second, `.` empty.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Board {
        let height = rows.len();
        let width = rows[0].len();
        let mut board = Board::new(width, height).unwrap();
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), width, "ragged fixture row {row}");
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    'X' => Cell::Occupied(Side::First),
                    'O' => Cell::Occupied(Side::Second),
                    '.' => Cell::Empty,
                    other => panic!("unexpected fixture character {other:?}"),
                };
                let idx = board.index(row, col);
                board.cells[idx] = cell;
            }
        }
        for col in 0..width {
            for row in 0..height - 1 {
                assert!(
                    board.get(row, col) == Cell::Empty || board.get(row + 1, col) != Cell::Empty,
                    "fixture has a floating piece at ({row}, {col})"
                );
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
