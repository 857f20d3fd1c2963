//! Progression module - score, play time, level, and drop speed
//!
//! Score rules:
//! - Color match: 50 points per removed cell.
//! - Full line: 500 points per line (50 per cell * 10).
//! - Cascades score every pass the same way; there is no depth bonus.
//!
//! Leveling is checked once per clock second: when the score exceeds
//! `level * 10000` the level goes up by one and the drop interval shrinks by
//! 50ms, down to a 100ms floor.

use crate::types::{
    BASE_DROP_MS, LEVEL_SPEEDUP_MS, LEVEL_UP_SCORE_STEP, LINE_POINTS_PER_CELL,
    MATCH_POINTS_PER_CELL, MIN_DROP_MS,
};

/// Points for cells removed by color matches
pub fn match_score(cells: u32) -> u32 {
    cells.saturating_mul(MATCH_POINTS_PER_CELL)
}

/// Points for removed full lines
pub fn line_score(lines: u32) -> u32 {
    lines.saturating_mul(LINE_POINTS_PER_CELL)
}

/// Score the current level must be exceeded by to level up
pub fn level_up_threshold(level: u32) -> u32 {
    level.saturating_mul(LEVEL_UP_SCORE_STEP)
}

/// Drop interval for a level (1-based), in milliseconds
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(LEVEL_SPEEDUP_MS);
    BASE_DROP_MS.saturating_sub(speedup).max(MIN_DROP_MS)
}

/// Score, elapsed time, level, and the drop interval derived from the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Progression {
    score: u32,
    elapsed_secs: u32,
    level: u32,
    drop_interval_ms: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            score: 0,
            elapsed_secs: 0,
            level: 1,
            drop_interval_ms: BASE_DROP_MS,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Add points; the score never decreases
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Advance the clock by one second and re-check the level.
    ///
    /// Returns true if the level went up.
    pub fn advance_clock(&mut self) -> bool {
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);

        if self.score > level_up_threshold(self.level) {
            self.level += 1;
            self.drop_interval_ms = drop_interval_ms(self.level);
            return true;
        }
        false
    }

    /// Overwrite the score (fixtures and scripted scenarios)
    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}
