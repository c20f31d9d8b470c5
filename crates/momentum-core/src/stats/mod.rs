//! Statistics module for Momentum
//!
//! This module provides the productivity aggregation model: daily scoring
//! and grading, consecutive-day streaks, and weekly progress. Everything
//! here is pure; persistence and gathering live in `storage` and
//! `recorder`.

mod score;
mod streak;
mod week;

pub use score::{
    productivity_score, productivity_score_with_target, DayCounters, Grade, ScoreWeights,
    FOCUS_TARGET_SECS,
};
pub use streak::StreakPolicy;
pub use week::{week_progress, week_start, week_window};

use serde::{Deserialize, Serialize};

/// Aggregate dashboard statistics for one reference day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductivityStats {
    /// Consecutive qualifying days ending on the reference day
    pub streak: u32,
    /// Mean score over the reference day's week, as a percentage
    pub week_progress: u8,
    /// Recorded score for the reference day, 0.0 when no log exists
    pub today_score: f64,
    /// Grade for the reference day, `N/A` when no log exists
    pub today_grade: Grade,
}

impl Default for ProductivityStats {
    fn default() -> Self {
        Self {
            streak: 0,
            week_progress: 0,
            today_score: 0.0,
            today_grade: Grade::NA,
        }
    }
}
