//! Domain types for the dashboard: todos, habits, schedule, metrics, roadmap.
//!
//! All dates are local calendar days serialized as `YYYY-MM-DD`. Completion of
//! schedule slots and habits is not stored on the row itself but as
//! set-membership in a per-day log (see `storage::Database`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A one-off task for a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Whether this is one of the day's priority tasks
    pub is_priority: bool,
    /// Whether the task is completed
    pub is_done: bool,
    /// Day the task belongs to
    pub date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A recurring daily habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    /// Unique identifier
    pub id: String,
    /// Habit name
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Category of a schedule slot, for display grouping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    /// Deep work on the product
    Build,
    /// Day job hours
    Job,
    /// Health and recovery
    Health,
    /// Social media and audience
    Social,
    /// Study and skill building
    Learn,
    /// Planning and review
    Admin,
}

impl SlotCategory {
    /// Stable lowercase name, also used as the store representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotCategory::Build => "build",
            SlotCategory::Job => "job",
            SlotCategory::Health => "health",
            SlotCategory::Social => "social",
            SlotCategory::Learn => "learn",
            SlotCategory::Admin => "admin",
        }
    }

    /// Parse a lowercase category name. Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "build" => Some(SlotCategory::Build),
            "job" => Some(SlotCategory::Job),
            "health" => Some(SlotCategory::Health),
            "social" => Some(SlotCategory::Social),
            "learn" => Some(SlotCategory::Learn),
            "admin" => Some(SlotCategory::Admin),
            _ => None,
        }
    }
}

impl Default for SlotCategory {
    fn default() -> Self {
        SlotCategory::Build
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed block in the daily schedule.
///
/// Slots themselves carry no completion state; a slot is "done" for a day
/// exactly when a completion entry `(slot_id, date)` exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleSlot {
    /// Unique identifier
    pub id: String,
    /// Start time as zero-padded `HH:MM`
    pub start_time: String,
    /// End time as zero-padded `HH:MM`
    pub end_time: String,
    /// What happens in this block
    pub activity: String,
    /// Display category
    pub category: SlotCategory,
}

/// Snapshot of business metrics for one day.
///
/// Growth is derived client-side by comparing snapshots; the store only
/// keeps the latest absolute values per day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyMetrics {
    /// Day the snapshot belongs to
    pub date: NaiveDate,
    /// Monthly revenue in whole currency units
    pub revenue: i64,
    /// Instagram follower count
    pub followers_instagram: i64,
    /// YouTube subscriber count
    pub followers_youtube: i64,
    /// Number of products live
    pub products_live: i64,
}

/// Status of a roadmap week.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekStatus {
    /// Not started yet
    Pending,
    /// The week being worked right now
    Current,
    /// Finished
    Done,
}

impl WeekStatus {
    /// Stable lowercase name, also used as the store representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekStatus::Pending => "pending",
            WeekStatus::Current => "current",
            WeekStatus::Done => "done",
        }
    }

    /// Parse a lowercase status name. Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(WeekStatus::Pending),
            "current" => Some(WeekStatus::Current),
            "done" => Some(WeekStatus::Done),
            _ => None,
        }
    }
}

impl Default for WeekStatus {
    fn default() -> Self {
        WeekStatus::Pending
    }
}

impl fmt::Display for WeekStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One week inside a roadmap month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoadmapWeek {
    /// Unique identifier
    pub id: String,
    /// Week number within the plan (1-based)
    pub week_number: i64,
    /// Week title
    pub title: String,
    /// Progress status
    pub status: WeekStatus,
}

/// One month of the master plan with its weekly breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoadmapMonth {
    /// Unique identifier
    pub id: String,
    /// Month number within the plan (1-based)
    pub month_number: i64,
    /// Month title
    pub title: String,
    /// Focus area for the month
    pub focus_area: String,
    /// Revenue target as display text
    pub revenue_target: String,
    /// Weeks of the month, ordered by week number
    pub weeks: Vec<RoadmapWeek>,
}

/// Persisted daily activity snapshot with its frozen score.
///
/// The score is computed at write time and stored with the counters, so
/// historical days keep the grade they earned even if scoring weights
/// change later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyActivityLog {
    /// Day the snapshot belongs to
    pub date: NaiveDate,
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
    /// Productivity score in `[0.0, 1.0]`, frozen at write time
    pub score: f64,
    /// Last write timestamp
    pub updated_at: DateTime<Utc>,
}

impl DailyActivityLog {
    /// The raw counters of this snapshot, for re-scoring or display.
    pub fn counters(&self) -> crate::stats::DayCounters {
        crate::stats::DayCounters {
            schedule_completed: self.schedule_completed,
            schedule_total: self.schedule_total,
            tasks_completed: self.tasks_completed,
            tasks_total: self.tasks_total,
            focus_seconds: self.focus_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_category_round_trips_through_names() {
        for cat in [
            SlotCategory::Build,
            SlotCategory::Job,
            SlotCategory::Health,
            SlotCategory::Social,
            SlotCategory::Learn,
            SlotCategory::Admin,
        ] {
            assert_eq!(SlotCategory::parse(cat.as_str()), Some(cat));
        }
        assert_eq!(SlotCategory::parse("gym"), None);
    }

    #[test]
    fn week_status_round_trips_through_names() {
        for status in [WeekStatus::Pending, WeekStatus::Current, WeekStatus::Done] {
            assert_eq!(WeekStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(WeekStatus::parse("blocked"), None);
    }

    #[test]
    fn week_status_serializes_lowercase() {
        let json = serde_json::to_string(&WeekStatus::Current).unwrap();
        assert_eq!(json, "\"current\"");
    }
}
