//! Active falling piece logic

use crate::board::{BOARD_WIDTH, Board};
use crate::collision::{rotate_piece, valid_move};
use crate::tetromino::{ColorIndex, Shape, TetrominoType};

/// A falling (or upcoming) piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The template this piece was spawned from
    pub kind: TetrominoType,
    /// Current occupancy matrix, changes on rotation
    pub shape: Shape,
    /// Color tag, picked independently of the kind
    pub color: ColorIndex,
    /// Column offset of the shape's left edge
    pub x: i32,
    /// Row offset of the shape's top edge. Row 0 is the top of the board;
    /// may be negative while entering from above
    pub y: i32,
}

impl Piece {
    /// Create a new piece at spawn position: horizontally centered, row 0
    pub fn new(kind: TetrominoType, color: ColorIndex) -> Self {
        let shape = kind.shape();
        let x = (BOARD_WIDTH / 2) as i32 - (shape.width() / 2) as i32;
        Self {
            kind,
            shape,
            color,
            x,
            y: 0,
        }
    }

    /// Get the absolute (row, col) positions of all occupied blocks
    pub fn block_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied()
            .map(|(r, c)| (self.y + r as i32, self.x + c as i32))
    }

    /// Try to move left, returns true if successful
    pub fn move_left(&mut self, board: &Board) -> bool {
        self.shift(board, -1, 0)
    }

    /// Try to move right, returns true if successful
    pub fn move_right(&mut self, board: &Board) -> bool {
        self.shift(board, 1, 0)
    }

    /// Try to move down, returns true if successful
    pub fn move_down(&mut self, board: &Board) -> bool {
        self.shift(board, 0, 1)
    }

    /// Try to rotate clockwise in place. No kicks: a blocked rotation
    /// leaves the piece as it was.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let rotated = rotate_piece(self);
        if valid_move(board, self, 0, 0, Some(&rotated)) {
            self.shape = rotated;
            true
        } else {
            false
        }
    }

    /// Hard drop - move down as far as possible and return distance dropped
    pub fn hard_drop(&mut self, board: &Board) -> i32 {
        let mut distance = 0;
        while self.move_down(board) {
            distance += 1;
        }
        distance
    }

    fn shift(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        if valid_move(board, self, dx, dy, None) {
            self.x += dx;
            self.y += dy;
            true
        } else {
            false
        }
    }
}
