//! High score persistence
//!
//! One best score per difficulty, stored as JSON
//! (`{"easy": 0, "medium": 0, "hard": 0}`) in the platform data directory.
//! Loading never fails: a missing or unreadable record reads as all zeros.

use crate::difficulty::Difficulty;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Best score for each difficulty
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

impl HighScores {
    pub fn get(&self, difficulty: Difficulty) -> u64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn set(&mut self, difficulty: Difficulty, score: u64) {
        match difficulty {
            Difficulty::Easy => self.easy = score,
            Difficulty::Medium => self.medium = score,
            Difficulty::Hard => self.hard = score,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("could not determine data directory")]
    NoDataDir,
    #[display("failed to write high scores: {_0}")]
    Io(std::io::Error),
    #[display("failed to serialize high scores: {_0}")]
    Serialize(serde_json::Error),
}

/// Key-value store holding the high score record
pub trait HighScoreStore {
    /// Read the record, falling back to all zeros on any problem
    fn load(&self) -> HighScores;

    /// Replace the stored record
    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError>;
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> HighScores {
        (**self).load()
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        (**self).save(scores)
    }
}

/// In-memory store, used in tests and when no data directory exists
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HighScores,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(scores: HighScores) -> Self {
        Self { scores, saves: 0 }
    }

    /// How many times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> HighScores {
        self.scores
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        self.scores = *scores;
        self.saves += 1;
        Ok(())
    }
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data dir>/high_scores.json`
    pub fn in_data_dir() -> Result<Self, StoreError> {
        ProjectDirs::from("com", "dropris", "dropris")
            .map(|dirs| Self::new(dirs.data_dir().join("high_scores.json")))
            .ok_or(StoreError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> HighScores {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Could not read {}: {}", self.path.display(), e);
                }
                return HighScores::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Corrupt high score record {}: {}", self.path.display(), e);
            HighScores::default()
        })
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(StoreError::Io)?;
        }

        let contents = serde_json::to_string_pretty(scores).map_err(StoreError::Serialize)?;
        fs::write(&self.path, contents).map_err(StoreError::Io)?;

        tracing::debug!("Saved high scores to {}", self.path.display());
        Ok(())
    }
}
