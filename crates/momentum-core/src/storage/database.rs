//! SQLite-based storage for the dashboard: todos, habits, schedule,
//! metrics, roadmap, and the daily activity log.
//!
//! Completion of schedule slots and habits is set-membership: a row in
//! `schedule_logs` / `habit_logs` keyed by `(id, date)` means done for that
//! day, and un-completing deletes the row. Re-inserting or re-deleting is
//! therefore idempotent by construction.

use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use uuid::Uuid;

use super::{data_dir, migrations};
use crate::error::{Result, StoreError, ValidationError};
use crate::model::{
    DailyActivityLog, DailyMetrics, Habit, RoadmapMonth, RoadmapWeek, ScheduleSlot, SlotCategory,
    Todo, WeekStatus,
};
use crate::plan;
use crate::stats::{
    productivity_score_with_target, DayCounters, Grade, ProductivityStats, ScoreWeights,
    StreakPolicy,
};
use crate::timer::FocusTimer;

/// kv key under which the focus timer state is persisted.
const TIMER_KEY: &str = "focus_timer";

// === Helper Functions ===

/// Format a calendar day for database storage
fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a calendar day from database string with fallback to today
fn parse_date_fallback(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap_or_else(|_| Local::now().date_naive())
}

/// Parse datetime from RFC3339 string with fallback to current time
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse slot category from database string
fn parse_slot_category(category_str: &str) -> SlotCategory {
    SlotCategory::parse(category_str).unwrap_or_default()
}

/// Parse week status from database string
fn parse_week_status(status_str: &str) -> WeekStatus {
    WeekStatus::parse(status_str).unwrap_or_default()
}

/// Build a Todo from a database row
fn row_to_todo(row: &rusqlite::Row) -> std::result::Result<Todo, rusqlite::Error> {
    let date_str: String = row.get(4)?;
    let created_at_str: String = row.get(5)?;
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        is_priority: row.get::<_, i32>(2)? != 0,
        is_done: row.get::<_, i32>(3)? != 0,
        date: parse_date_fallback(&date_str),
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// Build a Habit from a database row
fn row_to_habit(row: &rusqlite::Row) -> std::result::Result<Habit, rusqlite::Error> {
    let created_at_str: String = row.get(2)?;
    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// Build a ScheduleSlot from a database row
fn row_to_slot(row: &rusqlite::Row) -> std::result::Result<ScheduleSlot, rusqlite::Error> {
    let category_str: String = row.get(4)?;
    Ok(ScheduleSlot {
        id: row.get(0)?,
        start_time: row.get(1)?,
        end_time: row.get(2)?,
        activity: row.get(3)?,
        category: parse_slot_category(&category_str),
    })
}

/// Build a DailyMetrics snapshot from a database row
fn row_to_metrics(row: &rusqlite::Row) -> std::result::Result<DailyMetrics, rusqlite::Error> {
    let date_str: String = row.get(0)?;
    Ok(DailyMetrics {
        date: parse_date_fallback(&date_str),
        revenue: row.get(1)?,
        followers_instagram: row.get(2)?,
        followers_youtube: row.get(3)?,
        products_live: row.get(4)?,
    })
}

/// Build a DailyActivityLog from a database row
fn row_to_activity_log(row: &rusqlite::Row) -> std::result::Result<DailyActivityLog, rusqlite::Error> {
    let date_str: String = row.get(0)?;
    let updated_at_str: String = row.get(7)?;
    Ok(DailyActivityLog {
        date: parse_date_fallback(&date_str),
        schedule_completed: row.get(1)?,
        schedule_total: row.get(2)?,
        tasks_completed: row.get(3)?,
        tasks_total: row.get(4)?,
        focus_seconds: row.get(5)?,
        score: row.get(6)?,
        updated_at: parse_datetime_fallback(&updated_at_str),
    })
}

/// SQLite database for dashboard storage.
///
/// All reads report absence as `None` or an empty collection; errors are
/// reserved for the store itself failing.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/momentum/momentum.db`.
    ///
    /// Creates tables if they don't exist and seeds reference data
    /// (schedule, habits, roadmap) on first run.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let dir = data_dir().map_err(|e| crate::error::CoreError::Custom(e.to_string()))?;
        Self::open_at(&dir.join("momentum.db"))
    }

    /// Open the database at an explicit path (for embedding and tooling).
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        db.seed_defaults()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests). Reference data is not
    /// seeded; call `seed_defaults` explicitly when a test needs it.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        // Create base tables (v1 schema) first
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS daily_activity_logs (
                date               TEXT PRIMARY KEY,
                schedule_completed INTEGER NOT NULL DEFAULT 0,
                schedule_total     INTEGER NOT NULL DEFAULT 0,
                tasks_completed    INTEGER NOT NULL DEFAULT 0,
                tasks_total        INTEGER NOT NULL DEFAULT 0,
                focus_seconds      INTEGER NOT NULL DEFAULT 0,
                score              REAL NOT NULL DEFAULT 0,
                updated_at         TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS todos (
                id          TEXT PRIMARY KEY,
                title       TEXT NOT NULL,
                is_priority INTEGER NOT NULL DEFAULT 0,
                is_done     INTEGER NOT NULL DEFAULT 0,
                date        TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_todos_date ON todos(date);

            CREATE TABLE IF NOT EXISTS habits (
                id         TEXT PRIMARY KEY,
                name       TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS habit_logs (
                habit_id TEXT NOT NULL,
                date     TEXT NOT NULL,
                PRIMARY KEY (habit_id, date)
            );

            CREATE TABLE IF NOT EXISTS schedule_slots (
                id         TEXT PRIMARY KEY,
                start_time TEXT NOT NULL,
                end_time   TEXT NOT NULL,
                activity   TEXT NOT NULL,
                category   TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS schedule_logs (
                slot_id TEXT NOT NULL,
                date    TEXT NOT NULL,
                PRIMARY KEY (slot_id, date)
            );

            CREATE TABLE IF NOT EXISTS daily_metrics (
                date                TEXT PRIMARY KEY,
                revenue             INTEGER NOT NULL DEFAULT 0,
                followers_instagram INTEGER NOT NULL DEFAULT 0,
                followers_youtube   INTEGER NOT NULL DEFAULT 0,
                products_live       INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS roadmap_months (
                id             TEXT PRIMARY KEY,
                month_number   INTEGER NOT NULL,
                title          TEXT NOT NULL,
                focus_area     TEXT NOT NULL,
                revenue_target TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS roadmap_weeks (
                id          TEXT PRIMARY KEY,
                month_id    TEXT NOT NULL,
                week_number INTEGER NOT NULL,
                title       TEXT NOT NULL,
                status      TEXT NOT NULL DEFAULT 'pending'
            );

            CREATE INDEX IF NOT EXISTS idx_roadmap_weeks_month ON roadmap_weeks(month_id);",
        )?;

        // Run incremental migrations (v1 -> v2, etc.)
        migrations::migrate(&self.conn)?;

        Ok(())
    }

    /// Insert the built-in schedule, habits, and roadmap into empty tables.
    ///
    /// Seeds use fixed ids, so re-running is a no-op and user edits to
    /// seeded rows survive.
    pub fn seed_defaults(&self) -> Result<()> {
        let slot_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM schedule_slots", [], |row| row.get(0))?;
        if slot_count == 0 {
            for (index, slot) in plan::default_schedule().iter().enumerate() {
                self.conn.execute(
                    "INSERT OR IGNORE INTO schedule_slots (id, start_time, end_time, activity, category)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        format!("slot-{}", index + 1),
                        slot.start_time,
                        slot.end_time,
                        slot.activity,
                        slot.category.as_str(),
                    ],
                )?;
            }
        }

        let habit_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM habits", [], |row| row.get(0))?;
        if habit_count == 0 {
            let created_at = Utc::now().to_rfc3339();
            for (index, name) in plan::default_habits().iter().enumerate() {
                self.conn.execute(
                    "INSERT OR IGNORE INTO habits (id, name, created_at) VALUES (?1, ?2, ?3)",
                    params![format!("habit-{}", index + 1), name, created_at],
                )?;
            }
        }

        let month_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM roadmap_months", [], |row| row.get(0))?;
        if month_count == 0 {
            for month in plan::default_roadmap() {
                let month_id = format!("month-{}", month.month_number);
                self.conn.execute(
                    "INSERT OR IGNORE INTO roadmap_months (id, month_number, title, focus_area, revenue_target)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        month_id,
                        month.month_number,
                        month.title,
                        month.focus_area,
                        month.revenue_target,
                    ],
                )?;
                for week in &month.weeks {
                    self.conn.execute(
                        "INSERT OR IGNORE INTO roadmap_weeks (id, month_id, week_number, title, status)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            format!("week-{}", week.week_number),
                            month_id,
                            week.week_number,
                            week.title,
                            week.status.as_str(),
                        ],
                    )?;
                }
            }
        }

        Ok(())
    }

    /// Direct access to the underlying connection (escape hatch).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // === Todos ===

    /// List the todos for one day, oldest first.
    pub fn todos(&self, date: NaiveDate) -> Result<Vec<Todo>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, is_priority, is_done, date, created_at
             FROM todos WHERE date = ?1 ORDER BY created_at, id",
        )?;
        let todos = stmt.query_map(params![format_date(date)], row_to_todo)?;
        Ok(todos.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Add a todo for the given day. The title must be non-blank.
    pub fn add_todo(&self, title: &str, is_priority: bool, date: NaiveDate) -> Result<Todo> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField("title").into());
        }
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            is_priority,
            is_done: false,
            date,
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO todos (id, title, is_priority, is_done, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                todo.id,
                todo.title,
                todo.is_priority as i32,
                todo.is_done as i32,
                format_date(todo.date),
                todo.created_at.to_rfc3339(),
            ],
        )?;
        Ok(todo)
    }

    /// Set a todo's done flag. Setting the current value again is a no-op.
    pub fn set_todo_done(&self, id: &str, done: bool) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE todos SET is_done = ?1 WHERE id = ?2",
            params![done as i32, id],
        )?;
        if affected == 0 {
            return Err(ValidationError::UnknownId {
                entity: "todo",
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Delete a todo.
    pub fn delete_todo(&self, id: &str) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(ValidationError::UnknownId {
                entity: "todo",
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    // === Habits ===

    /// List all habits, oldest first.
    pub fn habits(&self) -> Result<Vec<Habit>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, created_at FROM habits ORDER BY created_at, id",
        )?;
        let habits = stmt.query_map([], row_to_habit)?;
        Ok(habits.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Add a habit. The name must be non-blank.
    pub fn add_habit(&self, name: &str) -> Result<Habit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        let habit = Habit {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO habits (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![habit.id, habit.name, habit.created_at.to_rfc3339()],
        )?;
        Ok(habit)
    }

    /// Habit ids completed on the given day.
    pub fn habit_completions(&self, date: NaiveDate) -> Result<HashSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT habit_id FROM habit_logs WHERE date = ?1")?;
        let ids = stmt.query_map(params![format_date(date)], |row| row.get::<_, String>(0))?;
        Ok(ids.collect::<std::result::Result<HashSet<_>, _>>()?)
    }

    /// Mark a habit done or not done for a day. Idempotent in both
    /// directions: re-completing or re-clearing changes nothing.
    pub fn set_habit_completed(&self, habit_id: &str, date: NaiveDate, completed: bool) -> Result<()> {
        self.ensure_exists("habits", "habit", habit_id)?;
        if completed {
            self.conn.execute(
                "INSERT OR IGNORE INTO habit_logs (habit_id, date) VALUES (?1, ?2)",
                params![habit_id, format_date(date)],
            )?;
        } else {
            self.conn.execute(
                "DELETE FROM habit_logs WHERE habit_id = ?1 AND date = ?2",
                params![habit_id, format_date(date)],
            )?;
        }
        Ok(())
    }

    // === Schedule ===

    /// List the daily schedule, ordered by start time.
    pub fn schedule(&self) -> Result<Vec<ScheduleSlot>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, start_time, end_time, activity, category
             FROM schedule_slots ORDER BY start_time, id",
        )?;
        let slots = stmt.query_map([], row_to_slot)?;
        Ok(slots.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Slot ids completed on the given day.
    pub fn schedule_completions(&self, date: NaiveDate) -> Result<HashSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT slot_id FROM schedule_logs WHERE date = ?1")?;
        let ids = stmt.query_map(params![format_date(date)], |row| row.get::<_, String>(0))?;
        Ok(ids.collect::<std::result::Result<HashSet<_>, _>>()?)
    }

    /// Mark a schedule slot done or not done for a day. Idempotent in both
    /// directions: re-completing or re-clearing changes nothing.
    pub fn set_slot_completed(&self, slot_id: &str, date: NaiveDate, completed: bool) -> Result<()> {
        self.ensure_exists("schedule_slots", "slot", slot_id)?;
        if completed {
            self.conn.execute(
                "INSERT OR IGNORE INTO schedule_logs (slot_id, date) VALUES (?1, ?2)",
                params![slot_id, format_date(date)],
            )?;
        } else {
            self.conn.execute(
                "DELETE FROM schedule_logs WHERE slot_id = ?1 AND date = ?2",
                params![slot_id, format_date(date)],
            )?;
        }
        Ok(())
    }

    // === Metrics ===

    /// The most recent metrics snapshot, or `None` when nothing has been
    /// recorded yet.
    pub fn latest_metrics(&self) -> Result<Option<DailyMetrics>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, revenue, followers_instagram, followers_youtube, products_live
             FROM daily_metrics ORDER BY date DESC LIMIT 1",
        )?;
        Ok(stmt.query_row([], row_to_metrics).optional()?)
    }

    /// Insert or replace the metrics snapshot for its day.
    pub fn upsert_metrics(&self, metrics: &DailyMetrics) -> Result<()> {
        self.conn.execute(
            "INSERT INTO daily_metrics (date, revenue, followers_instagram, followers_youtube, products_live)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(date) DO UPDATE SET
                revenue = excluded.revenue,
                followers_instagram = excluded.followers_instagram,
                followers_youtube = excluded.followers_youtube,
                products_live = excluded.products_live",
            params![
                format_date(metrics.date),
                metrics.revenue,
                metrics.followers_instagram,
                metrics.followers_youtube,
                metrics.products_live,
            ],
        )?;
        Ok(())
    }

    // === Roadmap ===

    /// The full roadmap: months ordered by month number, each with its
    /// weeks ordered by week number.
    pub fn roadmap(&self) -> Result<Vec<RoadmapMonth>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, month_number, title, focus_area, revenue_target
             FROM roadmap_months ORDER BY month_number",
        )?;
        let months = stmt.query_map([], |row| {
            Ok(RoadmapMonth {
                id: row.get(0)?,
                month_number: row.get(1)?,
                title: row.get(2)?,
                focus_area: row.get(3)?,
                revenue_target: row.get(4)?,
                weeks: Vec::new(),
            })
        })?;
        let mut months = months.collect::<std::result::Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT id, week_number, title, status FROM roadmap_weeks
             WHERE month_id = ?1 ORDER BY week_number",
        )?;
        for month in &mut months {
            let weeks = stmt.query_map(params![month.id], |row| {
                let status_str: String = row.get(3)?;
                Ok(RoadmapWeek {
                    id: row.get(0)?,
                    week_number: row.get(1)?,
                    title: row.get(2)?,
                    status: parse_week_status(&status_str),
                })
            })?;
            month.weeks = weeks.collect::<std::result::Result<Vec<_>, _>>()?;
        }
        Ok(months)
    }

    /// Set the status of a roadmap week.
    pub fn set_week_status(&self, week_id: &str, status: WeekStatus) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE roadmap_weeks SET status = ?1 WHERE id = ?2",
            params![status.as_str(), week_id],
        )?;
        if affected == 0 {
            return Err(ValidationError::UnknownId {
                entity: "week",
                id: week_id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    // === Daily activity ===

    /// Today's raw counters from the store. `focus_seconds` is left at zero;
    /// the caller folds in timer state, which does not live in these tables.
    pub fn day_counters(&self, date: NaiveDate) -> Result<DayCounters> {
        let schedule_total: u32 =
            self.conn
                .query_row("SELECT COUNT(*) FROM schedule_slots", [], |row| row.get(0))?;
        // Join against slots so completions of since-deleted slots don't count.
        let schedule_completed: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM schedule_logs l
             JOIN schedule_slots s ON s.id = l.slot_id
             WHERE l.date = ?1",
            params![format_date(date)],
            |row| row.get(0),
        )?;
        let (tasks_total, tasks_completed): (u32, u32) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(is_done), 0) FROM todos WHERE date = ?1",
            params![format_date(date)],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(DayCounters {
            schedule_completed,
            schedule_total,
            tasks_completed,
            tasks_total,
            focus_seconds: 0,
        })
    }

    /// Insert or replace the activity log for a day with the given counters,
    /// computing and freezing the score in the same write.
    ///
    /// Last writer wins: the stored row is always the full incoming state.
    pub fn upsert_daily_activity(
        &self,
        date: NaiveDate,
        counters: &DayCounters,
        weights: &ScoreWeights,
        focus_target_secs: u64,
    ) -> Result<DailyActivityLog> {
        let score = productivity_score_with_target(counters, weights, focus_target_secs);
        let log = DailyActivityLog {
            date,
            schedule_completed: counters.schedule_completed,
            schedule_total: counters.schedule_total,
            tasks_completed: counters.tasks_completed,
            tasks_total: counters.tasks_total,
            focus_seconds: counters.focus_seconds,
            score,
            updated_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO daily_activity_logs
                (date, schedule_completed, schedule_total, tasks_completed, tasks_total,
                 focus_seconds, score, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(date) DO UPDATE SET
                schedule_completed = excluded.schedule_completed,
                schedule_total = excluded.schedule_total,
                tasks_completed = excluded.tasks_completed,
                tasks_total = excluded.tasks_total,
                focus_seconds = excluded.focus_seconds,
                score = excluded.score,
                updated_at = excluded.updated_at",
            params![
                format_date(log.date),
                log.schedule_completed,
                log.schedule_total,
                log.tasks_completed,
                log.tasks_total,
                log.focus_seconds,
                log.score,
                log.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(log)
    }

    /// The activity log for one day, or `None` when nothing was recorded.
    pub fn activity_log(&self, date: NaiveDate) -> Result<Option<DailyActivityLog>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, schedule_completed, schedule_total, tasks_completed, tasks_total,
                    focus_seconds, score, updated_at
             FROM daily_activity_logs WHERE date = ?1",
        )?;
        Ok(stmt
            .query_row(params![format_date(date)], row_to_activity_log)
            .optional()?)
    }

    /// All recorded scores keyed by day, for streak and week calculations.
    pub fn score_history(&self) -> Result<HashMap<NaiveDate, f64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, score FROM daily_activity_logs")?;
        let rows = stmt.query_map([], |row| {
            let date_str: String = row.get(0)?;
            Ok((parse_date_fallback(&date_str), row.get::<_, f64>(1)?))
        })?;
        Ok(rows.collect::<std::result::Result<HashMap<_, _>, _>>()?)
    }

    /// Aggregate stats for a reference day from the recorded history.
    ///
    /// Uses the scores frozen at write time, so historical days keep the
    /// grades they earned under the weights in force back then.
    pub fn productivity_stats(
        &self,
        date: NaiveDate,
        policy: &StreakPolicy,
    ) -> Result<ProductivityStats> {
        let history = self.score_history()?;
        let today_score = history.get(&date).copied();
        Ok(ProductivityStats {
            streak: policy.streak(&history, date),
            week_progress: crate::stats::week_progress(&history, date),
            today_score: today_score.unwrap_or(0.0),
            today_grade: Grade::from_recorded(today_score),
        })
    }

    // === kv store ===

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        Ok(stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    // === Focus timer persistence ===

    /// Load the persisted focus timer, or a fresh idle timer for `today`
    /// when none is stored. Corrupt state is discarded with a warning.
    pub fn load_timer(&self, today: NaiveDate) -> Result<FocusTimer> {
        match self.kv_get(TIMER_KEY)? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(timer) => Ok(timer),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable focus timer state");
                    Ok(FocusTimer::new(today))
                }
            },
            None => Ok(FocusTimer::new(today)),
        }
    }

    /// Persist the focus timer state.
    pub fn save_timer(&self, timer: &FocusTimer) -> Result<()> {
        let json = serde_json::to_string(timer)?;
        self.kv_set(TIMER_KEY, &json)
    }

    // === Internal helpers ===

    /// Error with `UnknownId` unless a row with this id exists.
    fn ensure_exists(&self, table: &str, entity: &'static str, id: &str) -> Result<()> {
        // Table names come from call sites, never from input.
        let sql = format!("SELECT 1 FROM {table} WHERE id = ?1");
        let found: Option<i32> = self
            .conn
            .query_row(&sql, params![id], |row| row.get(0))
            .optional()?;
        if found.is_none() {
            return Err(ValidationError::UnknownId {
                entity,
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_and_list_todos_for_a_day() {
        let db = Database::open_memory().unwrap();
        let today = date(2026, 1, 15);
        db.add_todo("Ship landing page", true, today).unwrap();
        db.add_todo("Reply to comments", false, today).unwrap();
        db.add_todo("Different day", false, date(2026, 1, 16)).unwrap();

        let todos = db.todos(today).unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].title, "Ship landing page");
        assert!(todos[0].is_priority);
        assert!(!todos[0].is_done);
    }

    #[test]
    fn blank_todo_title_is_rejected() {
        let db = Database::open_memory().unwrap();
        let err = db.add_todo("   ", false, date(2026, 1, 15)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(db.todos(date(2026, 1, 15)).unwrap().is_empty());
    }

    #[test]
    fn toggling_a_todo_updates_done_flag() {
        let db = Database::open_memory().unwrap();
        let today = date(2026, 1, 15);
        let todo = db.add_todo("Write outline", false, today).unwrap();

        db.set_todo_done(&todo.id, true).unwrap();
        assert!(db.todos(today).unwrap()[0].is_done);

        db.set_todo_done(&todo.id, false).unwrap();
        assert!(!db.todos(today).unwrap()[0].is_done);
    }

    #[test]
    fn toggling_unknown_todo_is_a_validation_error() {
        let db = Database::open_memory().unwrap();
        let err = db.set_todo_done("nope", true).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::UnknownId { entity: "todo", .. })
        ));
    }

    #[test]
    fn slot_completion_is_set_membership() {
        let db = Database::open_memory().unwrap();
        db.seed_defaults().unwrap();
        let today = date(2026, 1, 15);

        db.set_slot_completed("slot-1", today, true).unwrap();
        // Re-completing is a no-op, not an error or a duplicate.
        db.set_slot_completed("slot-1", today, true).unwrap();
        assert_eq!(db.schedule_completions(today).unwrap().len(), 1);

        db.set_slot_completed("slot-1", today, false).unwrap();
        db.set_slot_completed("slot-1", today, false).unwrap();
        assert!(db.schedule_completions(today).unwrap().is_empty());
    }

    #[test]
    fn completions_are_scoped_to_their_day() {
        let db = Database::open_memory().unwrap();
        db.seed_defaults().unwrap();
        db.set_slot_completed("slot-1", date(2026, 1, 15), true).unwrap();

        assert!(db.schedule_completions(date(2026, 1, 16)).unwrap().is_empty());
        assert_eq!(db.schedule_completions(date(2026, 1, 15)).unwrap().len(), 1);
    }

    #[test]
    fn completing_unknown_slot_is_a_validation_error() {
        let db = Database::open_memory().unwrap();
        db.seed_defaults().unwrap();
        let err = db
            .set_slot_completed("slot-99", date(2026, 1, 15), true)
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn habit_completions_round_trip() {
        let db = Database::open_memory().unwrap();
        db.seed_defaults().unwrap();
        let today = date(2026, 1, 15);

        let habits = db.habits().unwrap();
        assert_eq!(habits.len(), 7);

        db.set_habit_completed(&habits[0].id, today, true).unwrap();
        let done = db.habit_completions(today).unwrap();
        assert!(done.contains(&habits[0].id));

        db.set_habit_completed(&habits[0].id, today, false).unwrap();
        assert!(db.habit_completions(today).unwrap().is_empty());
    }

    #[test]
    fn seeded_schedule_is_ordered_by_start_time() {
        let db = Database::open_memory().unwrap();
        db.seed_defaults().unwrap();
        let slots = db.schedule().unwrap();
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0].activity, "Wake Up + Hydrate");
        for pair in slots.windows(2) {
            assert!(pair[0].start_time <= pair[1].start_time);
        }
    }

    #[test]
    fn seeding_twice_does_not_duplicate() {
        let db = Database::open_memory().unwrap();
        db.seed_defaults().unwrap();
        db.seed_defaults().unwrap();
        assert_eq!(db.schedule().unwrap().len(), 10);
        assert_eq!(db.habits().unwrap().len(), 7);
        assert_eq!(db.roadmap().unwrap().len(), 2);
    }

    #[test]
    fn metrics_absent_then_latest_by_date() {
        let db = Database::open_memory().unwrap();
        assert!(db.latest_metrics().unwrap().is_none());

        db.upsert_metrics(&DailyMetrics {
            date: date(2026, 1, 14),
            revenue: 1000,
            followers_instagram: 150,
            followers_youtube: 40,
            products_live: 1,
        })
        .unwrap();
        db.upsert_metrics(&DailyMetrics {
            date: date(2026, 1, 15),
            revenue: 1200,
            followers_instagram: 160,
            followers_youtube: 41,
            products_live: 1,
        })
        .unwrap();

        let latest = db.latest_metrics().unwrap().unwrap();
        assert_eq!(latest.date, date(2026, 1, 15));
        assert_eq!(latest.revenue, 1200);
    }

    #[test]
    fn metrics_upsert_replaces_same_day() {
        let db = Database::open_memory().unwrap();
        let snapshot = DailyMetrics {
            date: date(2026, 1, 15),
            revenue: 1000,
            followers_instagram: 150,
            followers_youtube: 40,
            products_live: 1,
        };
        db.upsert_metrics(&snapshot).unwrap();
        db.upsert_metrics(&DailyMetrics {
            revenue: 2000,
            ..snapshot
        })
        .unwrap();

        let latest = db.latest_metrics().unwrap().unwrap();
        assert_eq!(latest.revenue, 2000);
    }

    #[test]
    fn roadmap_nests_weeks_under_months() {
        let db = Database::open_memory().unwrap();
        db.seed_defaults().unwrap();
        let roadmap = db.roadmap().unwrap();
        assert_eq!(roadmap.len(), 2);
        assert_eq!(roadmap[0].month_number, 1);
        assert_eq!(roadmap[0].weeks.len(), 4);
        assert_eq!(roadmap[0].weeks[0].status, WeekStatus::Current);
        assert_eq!(roadmap[1].weeks[0].week_number, 5);
    }

    #[test]
    fn week_status_updates_and_rejects_unknown_ids() {
        let db = Database::open_memory().unwrap();
        db.seed_defaults().unwrap();

        db.set_week_status("week-1", WeekStatus::Done).unwrap();
        let roadmap = db.roadmap().unwrap();
        assert_eq!(roadmap[0].weeks[0].status, WeekStatus::Done);

        let err = db.set_week_status("week-99", WeekStatus::Done).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn activity_upsert_freezes_score_and_replaces_state() {
        let db = Database::open_memory().unwrap();
        let today = date(2026, 1, 15);
        let weights = ScoreWeights::balanced();

        let counters = DayCounters {
            schedule_completed: 2,
            schedule_total: 4,
            tasks_completed: 1,
            tasks_total: 2,
            focus_seconds: 9_000,
        };
        let log = db
            .upsert_daily_activity(today, &counters, &weights, crate::stats::FOCUS_TARGET_SECS)
            .unwrap();
        assert!((log.score - 0.5).abs() < 1e-9);

        // Second write for the same day replaces the whole row.
        let counters = DayCounters {
            schedule_completed: 4,
            schedule_total: 4,
            tasks_completed: 2,
            tasks_total: 2,
            focus_seconds: 18_000,
        };
        db.upsert_daily_activity(today, &counters, &weights, crate::stats::FOCUS_TARGET_SECS)
            .unwrap();

        let stored = db.activity_log(today).unwrap().unwrap();
        assert_eq!(stored.schedule_completed, 4);
        assert_eq!(stored.focus_seconds, 18_000);
        assert_eq!(stored.score, 1.0);
        // Still a single row.
        assert_eq!(db.score_history().unwrap().len(), 1);
    }

    #[test]
    fn activity_log_absent_is_none() {
        let db = Database::open_memory().unwrap();
        assert!(db.activity_log(date(2026, 1, 15)).unwrap().is_none());
    }

    #[test]
    fn day_counters_reflect_store_state() {
        let db = Database::open_memory().unwrap();
        db.seed_defaults().unwrap();
        let today = date(2026, 1, 15);

        let todo = db.add_todo("Record video", false, today).unwrap();
        db.add_todo("Edit thumbnail", false, today).unwrap();
        db.set_todo_done(&todo.id, true).unwrap();
        db.set_slot_completed("slot-3", today, true).unwrap();

        let counters = db.day_counters(today).unwrap();
        assert_eq!(counters.schedule_total, 10);
        assert_eq!(counters.schedule_completed, 1);
        assert_eq!(counters.tasks_total, 2);
        assert_eq!(counters.tasks_completed, 1);
        assert_eq!(counters.focus_seconds, 0);
    }

    #[test]
    fn stats_compose_streak_week_and_today() {
        let db = Database::open_memory().unwrap();
        let weights = ScoreWeights::balanced();
        // Thursday 2026-01-15 plus the two days before it.
        for (day, focus) in [
            (date(2026, 1, 13), 18_000),
            (date(2026, 1, 14), 9_000),
            (date(2026, 1, 15), 18_000),
        ] {
            let counters = DayCounters {
                focus_seconds: focus,
                ..DayCounters::default()
            };
            db.upsert_daily_activity(day, &counters, &weights, crate::stats::FOCUS_TARGET_SECS)
                .unwrap();
        }

        let stats = db
            .productivity_stats(date(2026, 1, 15), &StreakPolicy::default())
            .unwrap();
        assert_eq!(stats.streak, 3);
        assert!(stats.today_score > 0.0);
        assert_eq!(stats.today_grade, Grade::from_score(stats.today_score));
        assert!(stats.week_progress > 0);
    }

    #[test]
    fn stats_for_unrecorded_day_are_defaults() {
        let db = Database::open_memory().unwrap();
        let stats = db
            .productivity_stats(date(2026, 1, 15), &StreakPolicy::default())
            .unwrap();
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.week_progress, 0);
        assert_eq!(stats.today_score, 0.0);
        assert_eq!(stats.today_grade, Grade::NA);
    }

    #[test]
    fn kv_round_trip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("missing").unwrap().is_none());
        db.kv_set("theme", "dark").unwrap();
        db.kv_set("theme", "light").unwrap();
        assert_eq!(db.kv_get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn timer_persists_through_kv() {
        let db = Database::open_memory().unwrap();
        let today = date(2026, 1, 15);

        let mut timer = db.load_timer(today).unwrap();
        assert!(!timer.is_running());
        timer.start();
        db.save_timer(&timer).unwrap();

        let restored = db.load_timer(today).unwrap();
        assert!(restored.is_running());
    }

    #[test]
    fn corrupt_timer_state_falls_back_to_fresh() {
        let db = Database::open_memory().unwrap();
        db.kv_set(TIMER_KEY, "{not json").unwrap();
        let timer = db.load_timer(date(2026, 1, 15)).unwrap();
        assert!(!timer.is_running());
        assert_eq!(timer.total_secs(), 0);
    }
}
