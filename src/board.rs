//! Game board representation, locking and line clears

use crate::piece::Piece;
use crate::tetromino::ColorIndex;

/// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(ColorIndex),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// Numeric cell value: 0 for empty, the color index otherwise
    pub fn value(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(color) => color.get(),
        }
    }
}

/// Result of merging a piece into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// Piece written, `lines_cleared` full rows removed afterwards
    Locked { lines_cleared: usize },
    /// Piece reached above row 0; the board was not touched
    ToppedOut,
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top, row increases downward
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let row = row as usize;
        let col = col as usize;
        if row >= BOARD_HEIGHT || col >= BOARD_WIDTH {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let row = row as usize;
        let col = col as usize;
        if row >= BOARD_HEIGHT || col >= BOARD_WIDTH {
            return false;
        }
        self.cells[row][col] = cell;
        true
    }

    /// Whether an in-bounds cell is filled. Out of bounds reads as empty;
    /// bounds are the caller's concern.
    pub fn is_filled(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some_and(|cell| cell.is_filled())
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.cells.iter()
    }

    /// Number of filled cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_filled())
            .count()
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Merge a piece into the board, then clear completed lines.
    ///
    /// Every block is checked for a negative row before anything is written,
    /// so a top-out leaves the board exactly as it was.
    pub fn lock_piece(&mut self, piece: &Piece) -> LockOutcome {
        if piece.block_positions().any(|(row, _)| row < 0) {
            return LockOutcome::ToppedOut;
        }

        for (row, col) in piece.block_positions() {
            self.set(row, col, Cell::Filled(piece.color));
        }

        LockOutcome::Locked {
            lines_cleared: self.clear_lines(),
        }
    }

    /// Clear completed lines and return the number cleared.
    ///
    /// Rows are scanned bottom to top. After a removal the same index is
    /// examined again, since the row above has slid into it.
    pub fn clear_lines(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut row = BOARD_HEIGHT;

        while row > 0 {
            let current = row - 1;
            if self.is_line_full(current) {
                self.cells.copy_within(0..current, 1);
                self.cells[0] = [Cell::Empty; BOARD_WIDTH];
                lines_cleared += 1;
            } else {
                row -= 1;
            }
        }

        lines_cleared
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn color(index: u8) -> Cell {
        Cell::Filled(ColorIndex::new(index).unwrap())
    }

    fn fill_row(board: &mut Board, row: i32, skip: Option<i32>) {
        for col in 0..BOARD_WIDTH as i32 {
            if Some(col) != skip {
                board.set(row, col, color(1));
            }
        }
    }

    /// Single sweep compaction: keep non-full rows in order, pad the top
    fn compact_stable(board: &Board) -> (Board, usize) {
        let kept: Vec<_> = board
            .rows()
            .filter(|row| !row.iter().all(|cell| cell.is_filled()))
            .copied()
            .collect();
        let cleared = BOARD_HEIGHT - kept.len();
        let mut result = Board::new();
        for (i, row) in kept.into_iter().enumerate() {
            result.cells[cleared + i] = row;
        }
        (result, cleared)
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 5, color(3)));
        assert_eq!(board.get(5, 5), Some(color(3)));
        assert_eq!(board.get(5, 5).map(|c| c.value()), Some(3));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_HEIGHT as i32, 0), None);
        assert_eq!(board.get(0, BOARD_WIDTH as i32), None);
        assert!(!board.set(-1, 0, color(1)));
        assert!(!board.set(0, BOARD_WIDTH as i32, color(1)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_single_line() {
        let mut board = Board::new();
        fill_row(&mut board, 19, None);
        board.set(18, 0, color(2));
        board.set(17, 4, color(5));
        let before = board.filled_count();

        let cleared = board.clear_lines();
        assert_eq!(cleared, 1);
        assert_eq!(board.filled_count(), before - BOARD_WIDTH);
        // Rows above slid down one, order preserved
        assert_eq!(board.get(19, 0), Some(color(2)));
        assert_eq!(board.get(18, 4), Some(color(5)));
        assert!(board.rows().next().unwrap().iter().all(Cell::is_empty));
    }

    #[test]
    fn test_clear_cascading_lines() {
        let mut board = Board::new();
        fill_row(&mut board, 19, None);
        fill_row(&mut board, 18, None);
        fill_row(&mut board, 17, Some(3));
        fill_row(&mut board, 16, None);

        let cleared = board.clear_lines();
        assert_eq!(cleared, 3);
        // The partial row ends up on the bottom
        assert!(board.get(19, 3).unwrap().is_empty());
        assert_eq!(board.filled_count(), BOARD_WIDTH - 1);
    }

    #[test]
    fn test_clear_no_full_lines() {
        let mut board = Board::new();
        fill_row(&mut board, 19, Some(0));
        let snapshot = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_cascading_clear_matches_stable_compaction() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let mut board = Board::new();
            for row in 0..BOARD_HEIGHT as i32 {
                // Bias toward full rows so clears actually happen
                if rng.gen_bool(0.4) {
                    fill_row(&mut board, row, None);
                } else {
                    for col in 0..BOARD_WIDTH as i32 {
                        if rng.gen_bool(0.5) {
                            board.set(row, col, color(rng.gen_range(1..=7)));
                        }
                    }
                }
            }

            let (expected, expected_cleared) = compact_stable(&board);
            let cleared = board.clear_lines();
            assert_eq!(cleared, expected_cleared);
            assert_eq!(board, expected);
        }
    }

    #[test]
    fn test_lock_piece_writes_color() {
        let mut board = Board::new();
        let mut piece = Piece::new(TetrominoType::O, ColorIndex::new(4).unwrap());
        piece.y = 18;
        piece.x = 0;

        let outcome = board.lock_piece(&piece);
        assert_eq!(outcome, LockOutcome::Locked { lines_cleared: 0 });
        for (row, col) in [(18, 0), (18, 1), (19, 0), (19, 1)] {
            assert_eq!(board.get(row, col), Some(color(4)));
        }
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_lock_above_board_tops_out_without_mutation() {
        let mut board = Board::new();
        board.set(19, 0, color(1));
        let snapshot = board.clone();

        let mut piece = Piece::new(TetrominoType::T, ColorIndex::new(2).unwrap());
        piece.y = -1;

        assert_eq!(board.lock_piece(&piece), LockOutcome::ToppedOut);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_lock_completing_row_clears_it() {
        let mut board = Board::new();
        fill_row(&mut board, 19, Some(9));

        // Vertical bar dropped into the gap
        let mut piece = Piece::new(TetrominoType::I, ColorIndex::new(6).unwrap());
        piece.shape = piece.shape.rotated_cw();
        piece.x = 9;
        piece.y = 16;

        assert_eq!(board.lock_piece(&piece), LockOutcome::Locked { lines_cleared: 1 });
        assert_eq!(board.filled_count(), 3);
        assert!(board.get(19, 0).unwrap().is_empty());
        assert_eq!(board.get(19, 9), Some(color(6)));
    }
}
