//! # Momentum Core Library
//!
//! This library provides the core business logic for the Momentum personal
//! productivity dashboard. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI being
//! a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Stats**: Pure daily scoring, letter grades, streaks, and week progress
//! - **Recorder**: Best-effort writer that snapshots the day's counters into
//!   a date-keyed activity log, freezing the score at write time
//! - **Focus Timer**: A wall-clock accumulator that requires the caller to
//!   periodically invoke `tick()`, persisted so sessions span invocations
//! - **Storage**: SQLite-based dashboard storage and TOML-based configuration
//! - **Dashboard**: Read facade that degrades to empty defaults when the
//!   store fails, so display surfaces never hard-fail
//!
//! ## Key Components
//!
//! - [`ActivityRecorder`]: Daily activity log writer
//! - [`Database`]: Dashboard persistence
//! - [`Dashboard`]: Degrading read facade
//! - [`Config`]: Application configuration management
//! - [`FocusTimer`]: Deep-work accumulator

pub mod dashboard;
pub mod error;
pub mod model;
pub mod plan;
pub mod recorder;
pub mod stats;
pub mod storage;
pub mod timer;

pub use dashboard::Dashboard;
pub use error::{ConfigError, CoreError, Result, StoreError, ValidationError};
pub use model::{
    DailyActivityLog, DailyMetrics, Habit, RoadmapMonth, RoadmapWeek, ScheduleSlot, SlotCategory,
    Todo, WeekStatus,
};
pub use plan::Plan;
pub use recorder::{ActivityRecorder, FlushOutcome};
pub use stats::{
    productivity_score, DayCounters, Grade, ProductivityStats, ScoreWeights, StreakPolicy,
    FOCUS_TARGET_SECS,
};
pub use storage::{Config, Database};
pub use timer::{FocusState, FocusTimer, TimerSnapshot};
