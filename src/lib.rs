//! DROPRIS - a classic falling-block puzzle
//!
//! The library holds the game itself: board, pieces, collision, line clears,
//! scoring and the per-game state machine, plus the high score store and the
//! terminal front-end pieces the binary wires together.

pub mod board;
pub mod collision;
pub mod difficulty;
pub mod game;
pub mod input;
pub mod menu;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod settings;
pub mod store;
pub mod tetromino;
pub mod ui;

pub use board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, LockOutcome};
pub use difficulty::Difficulty;
pub use game::{Action, Game, GameState};
pub use piece::Piece;
pub use store::{HighScoreStore, HighScores, JsonFileStore, MemoryStore, StoreError};
