//! Collision checks and rotation
//!
//! Both functions are pure: they never touch the piece or the board.

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Board};
use crate::piece::Piece;
use crate::tetromino::Shape;

/// Check whether `piece`, shifted by `(dx, dy)` and optionally carrying
/// `candidate` instead of its own shape, fits on the board.
///
/// Side walls and the floor are hard limits. Rows above the board are not
/// bounds-checked, so a piece may hang above row 0 while it enters.
pub fn valid_move(board: &Board, piece: &Piece, dx: i32, dy: i32, candidate: Option<&Shape>) -> bool {
    let shape = candidate.unwrap_or(&piece.shape);

    shape.occupied().all(|(r, c)| {
        let col = piece.x + c as i32 + dx;
        let row = piece.y + r as i32 + dy;

        if col < 0 || col >= BOARD_WIDTH as i32 || row >= BOARD_HEIGHT as i32 {
            return false;
        }

        row < 0 || !board.is_filled(row, col)
    })
}

/// Clockwise rotation of the piece's shape. The caller validates the result
/// with [`valid_move`] before committing it.
pub fn rotate_piece(piece: &Piece) -> Shape {
    piece.shape.rotated_cw()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::tetromino::{ColorIndex, TetrominoType};

    fn piece_at(kind: TetrominoType, x: i32, y: i32) -> Piece {
        let mut piece = Piece::new(kind, ColorIndex::new(3).unwrap());
        piece.x = x;
        piece.y = y;
        piece
    }

    fn filled() -> Cell {
        Cell::Filled(ColorIndex::new(1).unwrap())
    }

    #[test]
    fn test_valid_on_empty_board() {
        let board = Board::new();
        for kind in TetrominoType::all() {
            let piece = Piece::new(kind, ColorIndex::new(1).unwrap());
            assert!(valid_move(&board, &piece, 0, 0, None), "{:?}", kind);
        }
    }

    #[test]
    fn test_rejects_side_walls() {
        let board = Board::new();
        let piece = piece_at(TetrominoType::I, 0, 5);
        assert!(!valid_move(&board, &piece, -1, 0, None));
        let piece = piece_at(TetrominoType::I, 6, 5);
        assert!(valid_move(&board, &piece, 0, 0, None));
        assert!(!valid_move(&board, &piece, 1, 0, None));
    }

    #[test]
    fn test_rejects_floor() {
        let board = Board::new();
        let piece = piece_at(TetrominoType::O, 4, BOARD_HEIGHT as i32 - 2);
        assert!(valid_move(&board, &piece, 0, 0, None));
        assert!(!valid_move(&board, &piece, 0, 1, None));
    }

    #[test]
    fn test_allows_rows_above_board() {
        let board = Board::new();
        let piece = piece_at(TetrominoType::O, 4, -5);
        assert!(valid_move(&board, &piece, 0, 0, None));
        // Walls still apply above the board
        assert!(!valid_move(&board, &piece, -5, 0, None));
    }

    #[test]
    fn test_rejects_overlap() {
        let mut board = Board::new();
        board.set(10, 5, filled());
        let piece = piece_at(TetrominoType::O, 4, 8);
        assert!(valid_move(&board, &piece, 0, 0, None));
        assert!(!valid_move(&board, &piece, 0, 1, None));
        assert!(!valid_move(&board, &piece, 0, 2, None));
        assert!(valid_move(&board, &piece, -2, 2, None));
    }

    #[test]
    fn test_every_rejection_has_a_reason() {
        // Exhaustive sweep: any rejected placement must have a block off the
        // sides, below the floor, or on a filled cell
        let mut board = Board::new();
        for col in 0..BOARD_WIDTH as i32 {
            if col % 3 != 0 {
                board.set(15, col, filled());
            }
        }

        for kind in TetrominoType::all() {
            let mut shape = kind.shape();
            for _ in 0..4 {
                for x in -4..BOARD_WIDTH as i32 + 2 {
                    for y in -4..BOARD_HEIGHT as i32 + 2 {
                        let mut piece = piece_at(kind, x, y);
                        piece.shape = shape.clone();
                        let blocked = piece.block_positions().any(|(row, col)| {
                            col < 0
                                || col >= BOARD_WIDTH as i32
                                || row >= BOARD_HEIGHT as i32
                                || (row >= 0 && board.is_filled(row, col))
                        });
                        assert_eq!(valid_move(&board, &piece, 0, 0, None), !blocked);
                    }
                }
                shape = shape.rotated_cw();
            }
        }
    }

    #[test]
    fn test_candidate_shape_is_used() {
        let board = Board::new();
        // Horizontal bar flush with the right wall
        let piece = piece_at(TetrominoType::I, 6, 5);
        let vertical = rotate_piece(&piece);
        assert!(valid_move(&board, &piece, 0, 0, Some(&vertical)));
        let piece = piece_at(TetrominoType::I, 6, BOARD_HEIGHT as i32 - 1);
        assert!(!valid_move(&board, &piece, 0, 0, Some(&vertical)));
    }

    #[test]
    fn test_rotate_piece_does_not_mutate() {
        let piece = piece_at(TetrominoType::T, 4, 4);
        let before = piece.clone();
        let rotated = rotate_piece(&piece);
        assert_ne!(rotated, piece.shape);
        assert_eq!(piece, before);
    }
}
