//! Scoring module - line-clear points, level progression and gravity speed
//!
//! All functions are pure. Points are the base value of the clear times the
//! current level; the level rises every 10 lines up to 20, and each level
//! maps to a fixed gravity interval.

use crate::types::{
    DROP_INTERVALS, DROP_INTERVAL_FLOOR_MS, INITIAL_LEVEL, LINES_PER_LEVEL, LINE_SCORES, MAX_LEVEL,
};

/// Named line clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClearKind {
    Single,
    Double,
    Triple,
    Tetris,
}

impl ClearKind {
    /// Classification for a line count; `None` outside 1..=4.
    pub fn from_lines(lines: usize) -> Option<Self> {
        match lines {
            1 => Some(ClearKind::Single),
            2 => Some(ClearKind::Double),
            3 => Some(ClearKind::Triple),
            4 => Some(ClearKind::Tetris),
            _ => None,
        }
    }
}

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub score: u32,
    pub lines_cleared: usize,
    pub kind: Option<ClearKind>,
}

impl ScoreResult {
    pub fn is_single(&self) -> bool {
        self.kind == Some(ClearKind::Single)
    }

    pub fn is_double(&self) -> bool {
        self.kind == Some(ClearKind::Double)
    }

    pub fn is_triple(&self) -> bool {
        self.kind == Some(ClearKind::Triple)
    }

    pub fn is_tetris(&self) -> bool {
        self.kind == Some(ClearKind::Tetris)
    }
}

/// Calculate line clear score
/// lines: number of lines cleared (1-4, anything else scores 0)
/// level: current level (1-based)
pub fn calculate_score(lines: usize, level: u32) -> ScoreResult {
    let kind = ClearKind::from_lines(lines);
    let score = match kind {
        Some(_) => LINE_SCORES[lines].saturating_mul(level),
        None => 0,
    };

    ScoreResult {
        score,
        lines_cleared: lines,
        kind,
    }
}

/// Level management
/// Level increases every 10 lines cleared, starting at 1 and capped at 20
pub fn calculate_level(total_lines: u32) -> u32 {
    (total_lines / LINES_PER_LEVEL + INITIAL_LEVEL).min(MAX_LEVEL)
}

/// Get drop interval for a level (in milliseconds)
/// Levels outside the table use the 20ms floor
pub fn get_drop_speed(level: u32) -> u32 {
    level
        .checked_sub(1)
        .and_then(|i| DROP_INTERVALS.get(i as usize))
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_score(1, 1).score, 100);
        assert_eq!(calculate_score(2, 1).score, 300);
        assert_eq!(calculate_score(3, 1).score, 500);
        assert_eq!(calculate_score(4, 1).score, 800);

        assert_eq!(calculate_score(2, 5).score, 1500);
    }

    #[test]
    fn test_tetris_classification() {
        let result = calculate_score(4, 3);
        assert_eq!(result.score, 2400);
        assert!(result.is_tetris());
        assert!(!result.is_single());
        assert!(!result.is_double());
        assert!(!result.is_triple());
    }

    #[test]
    fn test_single_classification() {
        let result = calculate_score(1, 1);
        assert_eq!(result.score, 100);
        assert!(result.is_single());
        assert!(!result.is_tetris());
    }

    #[test]
    fn test_unexpected_line_counts_score_zero() {
        for lines in [0, 5, 20] {
            let result = calculate_score(lines, 7);
            assert_eq!(result.score, 0);
            assert_eq!(result.kind, None);
            assert_eq!(result.lines_cleared, lines);
        }
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(95), 10);
        assert_eq!(calculate_level(190), 20);
        assert_eq!(calculate_level(200), 20);
        assert_eq!(calculate_level(u32::MAX), 20);
    }

    #[test]
    fn test_drop_speeds() {
        assert_eq!(get_drop_speed(1), 1000);
        assert_eq!(get_drop_speed(2), 900);
        assert_eq!(get_drop_speed(9), 200);
        assert_eq!(get_drop_speed(10), 180);
        assert_eq!(get_drop_speed(14), 100);
        assert_eq!(get_drop_speed(17), 50);
        assert_eq!(get_drop_speed(20), 20);
        assert_eq!(get_drop_speed(21), 20); // Floor at 20
        assert_eq!(get_drop_speed(0), 20);
    }

    #[test]
    fn test_drop_speed_never_increases_with_level() {
        for level in 1..=25 {
            assert!(get_drop_speed(level + 1) <= get_drop_speed(level));
        }
    }
}
