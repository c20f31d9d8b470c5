//! Daily productivity scoring.
//!
//! A day's score is the weighted average of three components, each in
//! `[0.0, 1.0]`:
//!
//! - schedule: completed schedule slots / total slots
//! - tasks: completed todos / total todos
//! - focus: deep-work seconds / focus target, saturating at 1.0
//!
//! A component with a zero total contributes 0.0 rather than being skipped,
//! so an empty day scores 0.0 instead of dividing by zero.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Focus seconds at which the focus component saturates (5 hours).
pub const FOCUS_TARGET_SECS: u64 = 18_000;

/// Raw activity counters for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounters {
    /// Schedule slots completed
    pub schedule_completed: u32,
    /// Schedule slots defined
    pub schedule_total: u32,
    /// Todos completed
    pub tasks_completed: u32,
    /// Todos defined
    pub tasks_total: u32,
    /// Deep-work seconds accumulated
    pub focus_seconds: u64,
}

/// Weights for the three score components.
///
/// Each weight is a fraction in `[0.0, 1.0]`. Scoring divides by the weight
/// sum, so the weights need not sum to exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight for schedule slot completion
    pub schedule: f64,
    /// Weight for todo completion
    pub tasks: f64,
    /// Weight for deep-work time
    pub focus: f64,
}

impl ScoreWeights {
    /// Equal weighting of all three components.
    pub fn balanced() -> Self {
        Self {
            schedule: 1.0 / 3.0,
            tasks: 1.0 / 3.0,
            focus: 1.0 / 3.0,
        }
    }

    /// Normalize weights to sum to 1.0
    pub fn normalize(&mut self) {
        let sum = self.schedule + self.tasks + self.focus;
        if sum > 0.0 {
            self.schedule /= sum;
            self.tasks /= sum;
            self.focus /= sum;
        }
    }

    /// Validate that all weights are in [0.0, 1.0] and at least one is positive
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("schedule", self.schedule),
            ("tasks", self.tasks),
            ("focus", self.focus),
        ];

        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 || weight > 1.0 {
                return Err(format!(
                    "Weight '{}' must be in [0.0, 1.0], got {}",
                    name, weight
                ));
            }
        }

        if self.schedule + self.tasks + self.focus <= 0.0 {
            return Err("At least one weight must be positive".to_string());
        }

        Ok(())
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::balanced()
    }
}

/// Compute the productivity score for one day's counters.
///
/// Always returns a value in `[0.0, 1.0]`. Counters with `completed > total`
/// are clamped to their total.
pub fn productivity_score(counters: &DayCounters, weights: &ScoreWeights) -> f64 {
    productivity_score_with_target(counters, weights, FOCUS_TARGET_SECS)
}

/// Like [`productivity_score`], with an explicit focus saturation target.
pub fn productivity_score_with_target(
    counters: &DayCounters,
    weights: &ScoreWeights,
    focus_target_secs: u64,
) -> f64 {
    let schedule = completion_ratio(counters.schedule_completed, counters.schedule_total);
    let tasks = completion_ratio(counters.tasks_completed, counters.tasks_total);
    let focus = if focus_target_secs == 0 {
        0.0
    } else {
        (counters.focus_seconds as f64 / focus_target_secs as f64).min(1.0)
    };

    let sum = weights.schedule + weights.tasks + weights.focus;
    if sum <= 0.0 {
        return 0.0;
    }

    let score = (schedule * weights.schedule + tasks * weights.tasks + focus * weights.focus) / sum;
    score.clamp(0.0, 1.0)
}

fn completion_ratio(completed: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed.min(total) as f64 / total as f64
    }
}

/// Letter grade derived from a day's productivity score.
///
/// Grades are display-only; every threshold comparison works on the
/// underlying score. The derive order gives `NA < C < CPlus < B < BPlus
/// < A < APlus` so grades can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// No activity recorded for the day
    #[serde(rename = "N/A")]
    NA,
    /// Score below 0.50
    C,
    /// Score at or above 0.50
    #[serde(rename = "C+")]
    CPlus,
    /// Score at or above 0.60
    B,
    /// Score at or above 0.70
    #[serde(rename = "B+")]
    BPlus,
    /// Score at or above 0.80
    A,
    /// Score at or above 0.90
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    /// Map a score to its grade using inclusive lower bounds.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.90 {
            Grade::APlus
        } else if score >= 0.80 {
            Grade::A
        } else if score >= 0.70 {
            Grade::BPlus
        } else if score >= 0.60 {
            Grade::B
        } else if score >= 0.50 {
            Grade::CPlus
        } else {
            Grade::C
        }
    }

    /// Grade for an optional recorded score; `None` means no record exists.
    pub fn from_recorded(score: Option<f64>) -> Self {
        match score {
            Some(s) => Grade::from_score(s),
            None => Grade::NA,
        }
    }

    /// Display form, e.g. `"A+"` or `"N/A"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::NA => "N/A",
            Grade::C => "C",
            Grade::CPlus => "C+",
            Grade::B => "B",
            Grade::BPlus => "B+",
            Grade::A => "A",
            Grade::APlus => "A+",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
