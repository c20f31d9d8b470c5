//! Read facade over the store with degrade-to-default semantics.
//!
//! Every query here absorbs store failures: the error is logged and the
//! caller gets an empty collection, `None`, or zeroed stats instead. A
//! display surface built on this never hard-fails because the store is
//! briefly unavailable; it just renders an empty state. Writes are not
//! mediated here and keep their error reporting.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::model::{DailyMetrics, Habit, RoadmapMonth, ScheduleSlot, Todo};
use crate::stats::{ProductivityStats, StreakPolicy};
use crate::storage::Database;

/// Degrading read facade for display surfaces.
pub struct Dashboard {
    db: Database,
    streak_policy: StreakPolicy,
}

impl Dashboard {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            streak_policy: StreakPolicy::default(),
        }
    }

    pub fn with_streak_policy(db: Database, streak_policy: StreakPolicy) -> Self {
        Self { db, streak_policy }
    }

    /// The underlying store, for writes and anything not covered here.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Todos for one day; empty on store failure.
    pub fn todos(&self, date: NaiveDate) -> Vec<Todo> {
        self.db.todos(date).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "todos read failed, returning empty");
            Vec::new()
        })
    }

    /// All habits; empty on store failure.
    pub fn habits(&self) -> Vec<Habit> {
        self.db.habits().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "habits read failed, returning empty");
            Vec::new()
        })
    }

    /// Habit ids completed on one day; empty on store failure.
    pub fn habit_completions(&self, date: NaiveDate) -> HashSet<String> {
        self.db.habit_completions(date).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "habit completions read failed, returning empty");
            HashSet::new()
        })
    }

    /// The daily schedule; empty on store failure.
    pub fn schedule(&self) -> Vec<ScheduleSlot> {
        self.db.schedule().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "schedule read failed, returning empty");
            Vec::new()
        })
    }

    /// Slot ids completed on one day; empty on store failure.
    pub fn schedule_completions(&self, date: NaiveDate) -> HashSet<String> {
        self.db.schedule_completions(date).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "schedule completions read failed, returning empty");
            HashSet::new()
        })
    }

    /// Latest metrics snapshot; `None` both when nothing is recorded and
    /// on store failure.
    pub fn latest_metrics(&self) -> Option<DailyMetrics> {
        self.db.latest_metrics().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "metrics read failed, returning none");
            None
        })
    }

    /// The roadmap; empty on store failure.
    pub fn roadmap(&self) -> Vec<RoadmapMonth> {
        self.db.roadmap().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "roadmap read failed, returning empty");
            Vec::new()
        })
    }

    /// Aggregate stats for one day; zeroed (streak 0, N/A grade) on store
    /// failure, same as a day with no history.
    pub fn productivity_stats(&self, date: NaiveDate) -> ProductivityStats {
        self.db
            .productivity_stats(date, &self.streak_policy)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stats read failed, returning defaults");
                ProductivityStats::default()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Grade;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dashboard_with_seeds() -> Dashboard {
        let db = Database::open_memory().unwrap();
        db.seed_defaults().unwrap();
        Dashboard::new(db)
    }

    /// A dashboard whose store has lost its tables, so every query errors.
    fn broken_dashboard() -> Dashboard {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute_batch(
                "DROP TABLE todos;
                 DROP TABLE habits;
                 DROP TABLE habit_logs;
                 DROP TABLE schedule_slots;
                 DROP TABLE schedule_logs;
                 DROP TABLE daily_metrics;
                 DROP TABLE roadmap_months;
                 DROP TABLE roadmap_weeks;
                 DROP TABLE daily_activity_logs;",
            )
            .unwrap();
        Dashboard::new(db)
    }

    #[test]
    fn reads_pass_through_when_store_is_healthy() {
        let dash = dashboard_with_seeds();
        let today = date(2026, 1, 15);

        dash.db().add_todo("Write newsletter", false, today).unwrap();
        assert_eq!(dash.todos(today).len(), 1);
        assert_eq!(dash.schedule().len(), 10);
        assert_eq!(dash.habits().len(), 7);
        assert_eq!(dash.roadmap().len(), 2);
        assert!(dash.latest_metrics().is_none());
    }

    #[test]
    fn reads_degrade_to_empty_on_store_failure() {
        let dash = broken_dashboard();
        let today = date(2026, 1, 15);

        assert!(dash.todos(today).is_empty());
        assert!(dash.habits().is_empty());
        assert!(dash.habit_completions(today).is_empty());
        assert!(dash.schedule().is_empty());
        assert!(dash.schedule_completions(today).is_empty());
        assert!(dash.roadmap().is_empty());
        assert!(dash.latest_metrics().is_none());
    }

    #[test]
    fn stats_degrade_to_na_defaults_on_store_failure() {
        let dash = broken_dashboard();
        let stats = dash.productivity_stats(date(2026, 1, 15));
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.week_progress, 0);
        assert_eq!(stats.today_score, 0.0);
        assert_eq!(stats.today_grade, Grade::NA);
    }

    #[test]
    fn stats_reflect_recorded_history() {
        let dash = dashboard_with_seeds();
        let today = date(2026, 1, 15);
        let counters = crate::stats::DayCounters {
            focus_seconds: 18_000,
            ..Default::default()
        };
        dash.db()
            .upsert_daily_activity(
                today,
                &counters,
                &crate::stats::ScoreWeights::balanced(),
                crate::stats::FOCUS_TARGET_SECS,
            )
            .unwrap();

        let stats = dash.productivity_stats(today);
        assert_eq!(stats.streak, 1);
        assert!(stats.today_score > 0.0);
        assert_ne!(stats.today_grade, Grade::NA);
    }
}
