//! Tetromino definitions and shapes
//!
//! The 7 tetrominoes as binary occupancy matrices. Rotation is a plain
//! clockwise matrix turn; there is no rotation system beyond that.

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    T, // T-shape
    L, // L-shape
    J, // J-shape
    Z, // Z-shape
    S, // S-shape
}

impl TetrominoType {
    /// Get all tetromino types, in template order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::L,
            TetrominoType::J,
            TetrominoType::Z,
            TetrominoType::S,
        ]
    }

    /// Get the spawn shape for this tetromino
    pub fn shape(&self) -> Shape {
        match self {
            TetrominoType::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
            TetrominoType::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            // ###
            // .#.
            TetrominoType::T => Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
            // ###
            // #..
            TetrominoType::L => Shape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]),
            // ###
            // ..#
            TetrominoType::J => Shape::from_rows(&[&[1, 1, 1], &[0, 0, 1]]),
            // ##.
            // .##
            TetrominoType::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
            // .##
            // ##.
            TetrominoType::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        }
    }
}

/// Color tag of a filled cell, always in `1..=7`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorIndex(u8);

impl ColorIndex {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    /// Returns `None` outside `1..=7`
    pub fn new(index: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&index)
            .then_some(Self(index))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// All seven color indices in ascending order
    pub fn all() -> [ColorIndex; 7] {
        [1, 2, 3, 4, 5, 6, 7].map(ColorIndex)
    }
}

/// A rectangular occupancy matrix, stored as `[row][col]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    cells: Vec<Vec<bool>>,
}

impl Shape {
    /// Build a shape from rows of 0/1 values
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        Self {
            cells: rows
                .iter()
                .map(|row| row.iter().map(|&v| v != 0).collect())
                .collect(),
        }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Iterate the `(row, col)` offsets of occupied cells, top row first
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(col, _)| (row, col))
        })
    }

    /// Rotate 90 degrees clockwise: `new[x][y] = old[rows - 1 - y][x]`
    pub fn rotated_cw(&self) -> Shape {
        let rows = self.height();
        let cols = self.width();
        let cells = (0..cols)
            .map(|x| (0..rows).map(|y| self.cells[rows - 1 - y][x]).collect())
            .collect();
        Shape { cells }
    }
}
