//! Difficulty tiers: Easy, Medium, Hard

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Available difficulties. Only the gravity interval differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "One row every 800 ms",
            Difficulty::Medium => "One row every 500 ms",
            Difficulty::Hard => "One row every 300 ms",
        }
    }

    /// Time between gravity steps
    pub fn fall_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(800),
            Difficulty::Medium => Duration::from_millis(500),
            Difficulty::Hard => Duration::from_millis(300),
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}
