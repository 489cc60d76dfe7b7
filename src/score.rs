//! Scoring: triangular line-clear bonus

/// Points for clearing `lines` rows with a single lock:
/// `lines * 100 * (lines + 1) / 2`, so 1 → 100, 2 → 300, 3 → 600, 4 → 1000
pub fn line_clear_points(lines: usize) -> u64 {
    let lines = lines as u64;
    lines * 100 * (lines + 1) / 2
}

/// Score tracking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add score for a line clear.
    /// Returns the action name for display, or `None` when nothing cleared
    pub fn add_clear(&mut self, lines: usize) -> Option<&'static str> {
        if lines == 0 {
            return None;
        }

        self.points += line_clear_points(lines);
        self.lines += lines as u32;

        Some(match lines {
            1 => "Single",
            2 => "Double",
            3 => "Triple",
            _ => "Tetris",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 100);
        assert_eq!(line_clear_points(2), 300);
        assert_eq!(line_clear_points(3), 600);
        assert_eq!(line_clear_points(4), 1000);
    }

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(1), Some("Single"));
        assert_eq!(score.points, 100);
        assert_eq!(score.lines, 1);
    }

    #[test]
    fn test_tetris() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(4), Some("Tetris"));
        assert_eq!(score.points, 1000);
        assert_eq!(score.lines, 4);
    }

    #[test]
    fn test_no_clear_changes_nothing() {
        let mut score = Score::new();
        assert_eq!(score.add_clear(0), None);
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_clears_accumulate() {
        let mut score = Score::new();
        score.add_clear(2);
        score.add_clear(3);
        assert_eq!(score.points, 900);
        assert_eq!(score.lines, 5);
    }
}
