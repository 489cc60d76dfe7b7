//! Uniform piece randomizer
//!
//! Every draw picks one of the 7 templates uniformly and, independently, a
//! color index in `1..=7`. No bag, no history.

use crate::piece::Piece;
use crate::tetromino::{ColorIndex, TetrominoType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable piece generator
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: ChaCha8Rng,
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomizer {
    /// Create a randomizer seeded from the OS
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a deterministic randomizer
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw a fresh piece at its spawn position
    pub fn next_piece(&mut self) -> Piece {
        let kinds = TetrominoType::all();
        let kind = kinds[self.rng.gen_range(0..kinds.len())];
        let colors = ColorIndex::all();
        let color = colors[self.rng.gen_range(0..colors.len())];
        Piece::new(kind, color)
    }
}
