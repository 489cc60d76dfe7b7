//! Core game state and logic

use crate::board::{Board, LockOutcome};
use crate::collision::valid_move;
use crate::difficulty::Difficulty;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::Score;
use crate::store::HighScoreStore;
use std::time::Duration;

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
}

/// A single play session, from the first spawn to game over.
///
/// Owns the board, the active and next piece and the high score store.
/// Restarting builds a new `Game`; a finished one is never reset.
pub struct Game<S: HighScoreStore> {
    board: Board,
    current_piece: Piece,
    next_piece: Piece,
    randomizer: Randomizer,
    score: Score,
    difficulty: Difficulty,
    /// Time accumulated toward the next gravity step
    fall_timer: Duration,
    state: GameState,
    /// Best score for this difficulty, as shown during play
    high_score: u64,
    new_record: bool,
    last_clear: Option<&'static str>,
    store: S,
}

impl<S: HighScoreStore> Game<S> {
    /// Create a new game at the given difficulty
    pub fn new(difficulty: Difficulty, store: S) -> Self {
        Self::with_seed(difficulty, store, rand::random())
    }

    /// Create a new game with a fixed piece sequence
    pub fn with_seed(difficulty: Difficulty, store: S, seed: u64) -> Self {
        let mut randomizer = Randomizer::with_seed(seed);
        let current_piece = randomizer.next_piece();
        let next_piece = randomizer.next_piece();
        let high_score = store.load().get(difficulty);

        tracing::info!(
            "New game: difficulty={}, best={}, seed={}",
            difficulty.name(),
            high_score,
            seed
        );

        Self {
            board: Board::new(),
            current_piece,
            next_piece,
            randomizer,
            score: Score::new(),
            difficulty,
            fall_timer: Duration::ZERO,
            state: GameState::Playing,
            high_score,
            new_record: false,
            last_clear: None,
            store,
        }
    }

    /// Start over at the same difficulty with the same store
    pub fn restart(self) -> Self {
        Self::new(self.difficulty, self.store)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Best score for this difficulty, including the current game once it
    /// has set a new record
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Whether game over produced a new record
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    /// Label of the most recent line clear, cleared by a lock with no lines
    pub fn last_clear(&self) -> Option<&'static str> {
        self.last_clear
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, ending this game
    pub fn into_store(self) -> S {
        self.store
    }

    /// Advance the gravity timer (call every frame with the time since the
    /// previous call). Moves at most one row per call.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.state != GameState::Playing {
            return;
        }

        self.fall_timer = self.fall_timer.saturating_add(elapsed);
        if self.fall_timer >= self.difficulty.fall_interval() {
            if !self.current_piece.move_down(&self.board) {
                self.lock_piece();
            }
            self.fall_timer = Duration::ZERO;
        }
    }

    /// Process an action. Ignored once the game is over
    pub fn process_action(&mut self, action: Action) {
        if self.state != GameState::Playing {
            return;
        }

        match action {
            Action::MoveLeft => {
                self.current_piece.move_left(&self.board);
            }
            Action::MoveRight => {
                self.current_piece.move_right(&self.board);
            }
            Action::SoftDrop => {
                self.current_piece.move_down(&self.board);
            }
            Action::Rotate => {
                self.current_piece.rotate(&self.board);
            }
            Action::HardDrop => {
                let distance = self.current_piece.hard_drop(&self.board);
                tracing::trace!("Hard drop: {} rows", distance);
                self.lock_piece();
            }
        }
    }

    /// Lock the current piece, clear lines and spawn the next one
    fn lock_piece(&mut self) {
        let lines_cleared = match self.board.lock_piece(&self.current_piece) {
            LockOutcome::Locked { lines_cleared } => lines_cleared,
            LockOutcome::ToppedOut => {
                tracing::debug!("Top out: {:?} locked above the board", self.current_piece.kind);
                self.finish();
                return;
            }
        };

        self.last_clear = self.score.add_clear(lines_cleared);
        if let Some(label) = self.last_clear {
            tracing::debug!(
                "{}: {} lines, score now {}",
                label,
                lines_cleared,
                self.score.points
            );
        }

        // Promote next to current
        let next = std::mem::replace(&mut self.next_piece, self.randomizer.next_piece());
        self.current_piece = next;
        tracing::trace!("Spawned {:?}", self.current_piece.kind);

        // Block out: the new piece has no room
        if !valid_move(&self.board, &self.current_piece, 0, 0, None) {
            tracing::debug!("Block out: {:?} cannot spawn", self.current_piece.kind);
            self.finish();
        }
    }

    /// Enter the terminal state and record a new best score if we beat it
    fn finish(&mut self) {
        self.state = GameState::GameOver;

        let mut scores = self.store.load();
        let final_score = self.score.points;
        let best = scores.get(self.difficulty);

        if final_score > best {
            scores.set(self.difficulty, final_score);
            if let Err(e) = self.store.save(&scores) {
                tracing::warn!("Could not save high scores: {}", e);
            }
            self.new_record = true;
            self.high_score = final_score;
            tracing::info!(
                "Game over: {} points on {}, new record (was {})",
                final_score,
                self.difficulty.name(),
                best
            );
        } else {
            tracing::info!(
                "Game over: {} points on {} (best {})",
                final_score,
                self.difficulty.name(),
                best
            );
        }
    }
}
