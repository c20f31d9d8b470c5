//! Consecutive-day streak calculation.
//!
//! The streak counts backwards from a reference day: each day extends the
//! streak only if an activity log exists for it AND its recorded score
//! qualifies. The first gap or non-qualifying day ends the walk, so the
//! reference day itself failing means a streak of zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Policy deciding which recorded days extend a streak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakPolicy {
    /// A day qualifies when its score is strictly greater than this.
    pub min_score: f64,
}

impl StreakPolicy {
    /// Whether a recorded score extends the streak.
    pub fn qualifies(&self, score: f64) -> bool {
        score > self.min_score
    }

    /// Length of the streak ending on `as_of`, walking backwards through
    /// the per-day recorded scores.
    pub fn streak(&self, scores: &HashMap<NaiveDate, f64>, as_of: NaiveDate) -> u32 {
        let mut count = 0;
        let mut day = as_of;
        loop {
            match scores.get(&day) {
                Some(&score) if self.qualifies(score) => count += 1,
                _ => break,
            }
            day = match day.pred_opt() {
                Some(prev) => prev,
                None => break,
            };
        }
        count
    }
}

impl Default for StreakPolicy {
    fn default() -> Self {
        // Any recorded activity keeps the chain alive.
        Self { min_score: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scores(entries: &[(NaiveDate, f64)]) -> HashMap<NaiveDate, f64> {
        entries.iter().copied().collect()
    }

    #[test]
    fn empty_history_has_no_streak() {
        let policy = StreakPolicy::default();
        assert_eq!(policy.streak(&HashMap::new(), date(2026, 1, 15)), 0);
    }

    #[test]
    fn counts_consecutive_qualifying_days() {
        let policy = StreakPolicy::default();
        let history = scores(&[
            (date(2026, 1, 13), 0.4),
            (date(2026, 1, 14), 0.8),
            (date(2026, 1, 15), 0.6),
        ]);
        assert_eq!(policy.streak(&history, date(2026, 1, 15)), 3);
    }

    #[test]
    fn gap_breaks_the_streak() {
        let policy = StreakPolicy::default();
        // 2026-01-13 is missing.
        let history = scores(&[
            (date(2026, 1, 12), 0.9),
            (date(2026, 1, 14), 0.8),
            (date(2026, 1, 15), 0.6),
        ]);
        assert_eq!(policy.streak(&history, date(2026, 1, 15)), 2);
    }

    #[test]
    fn zero_score_day_breaks_the_streak() {
        let policy = StreakPolicy::default();
        let history = scores(&[
            (date(2026, 1, 13), 0.7),
            (date(2026, 1, 14), 0.0),
            (date(2026, 1, 15), 0.6),
        ]);
        assert_eq!(policy.streak(&history, date(2026, 1, 15)), 1);
    }

    #[test]
    fn reference_day_failing_means_zero() {
        let policy = StreakPolicy::default();
        let history = scores(&[
            (date(2026, 1, 13), 0.7),
            (date(2026, 1, 14), 0.8),
        ]);
        // No log on the 15th.
        assert_eq!(policy.streak(&history, date(2026, 1, 15)), 0);
    }

    #[test]
    fn raised_threshold_excludes_low_days() {
        let policy = StreakPolicy { min_score: 0.5 };
        let history = scores(&[
            (date(2026, 1, 13), 0.9),
            (date(2026, 1, 14), 0.5),
            (date(2026, 1, 15), 0.8),
        ]);
        // 0.5 is not strictly greater than the threshold.
        assert_eq!(policy.streak(&history, date(2026, 1, 15)), 1);
    }

    #[test]
    fn earlier_reference_ignores_later_days() {
        let policy = StreakPolicy::default();
        let history = scores(&[
            (date(2026, 1, 13), 0.7),
            (date(2026, 1, 14), 0.8),
            (date(2026, 1, 15), 0.6),
        ]);
        assert_eq!(policy.streak(&history, date(2026, 1, 14)), 2);
    }
}
