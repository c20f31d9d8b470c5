//! Focus timer implementation.
//!
//! The focus timer is a wall-clock-based accumulator. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically to fold elapsed wall-clock time into the running session.
//!
//! State is serializable and persists across process invocations (see
//! `Database::load_timer` / `save_timer`), so one command can start the
//! timer and a later one can stop it. Accumulated time is scoped to a
//! single day; `roll_to` resets the accumulator when the day changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusState {
    Idle,
    Running,
}

/// Wall-clock focus accumulator.
///
/// Operates on wall-clock deltas -- no internal thread.
/// The caller is responsible for calling `tick()` periodically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusTimer {
    state: FocusState,
    /// Day the accumulated time belongs to.
    day: NaiveDate,
    /// Milliseconds folded in from finished sessions today.
    accumulated_ms: u64,
    /// Milliseconds elapsed in the current session, up to the last tick.
    session_ms: u64,
    /// Timestamp (ms since epoch) of the last tick while running.
    /// Used to compute elapsed time between ticks.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

/// Read-only view of the timer for display.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimerSnapshot {
    pub state: FocusState,
    pub day: NaiveDate,
    pub session_secs: u64,
    pub total_secs: u64,
}

impl FocusTimer {
    /// Create an idle timer scoped to `day`.
    pub fn new(day: NaiveDate) -> Self {
        Self {
            state: FocusState::Idle,
            day,
            accumulated_ms: 0,
            session_ms: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FocusState::Running
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Seconds in the current session, up to the last tick.
    pub fn session_secs(&self) -> u64 {
        self.session_ms / 1000
    }

    /// Total focus seconds for the day, up to the last tick.
    pub fn total_secs(&self) -> u64 {
        (self.accumulated_ms + self.session_ms) / 1000
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            day: self.day,
            session_secs: self.session_secs(),
            total_secs: self.total_secs(),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Start a focus session. Returns false if one is already running.
    pub fn start(&mut self) -> bool {
        match self.state {
            FocusState::Idle => {
                self.state = FocusState::Running;
                self.last_tick_epoch_ms = Some(now_ms());
                true
            }
            FocusState::Running => false,
        }
    }

    /// Fold wall-clock time elapsed since the last tick into the session.
    pub fn tick(&mut self) {
        if self.state == FocusState::Running {
            self.flush_elapsed();
        }
    }

    /// Stop the running session, folding it into the day's total.
    /// Returns the finished session's length in seconds (0 when idle).
    pub fn stop(&mut self) -> u64 {
        if self.state != FocusState::Running {
            return 0;
        }
        self.flush_elapsed();
        let session_secs = self.session_ms / 1000;
        self.accumulated_ms += self.session_ms;
        self.session_ms = 0;
        self.last_tick_epoch_ms = None;
        self.state = FocusState::Idle;
        session_secs
    }

    /// Re-scope the accumulator to `today`, discarding time from past days.
    ///
    /// A session running across midnight keeps running; its elapsed time
    /// counts toward the new day from this call onward.
    pub fn roll_to(&mut self, today: NaiveDate) {
        if self.day == today {
            return;
        }
        self.day = today;
        self.accumulated_ms = 0;
        self.session_ms = 0;
        if self.state == FocusState::Running {
            self.last_tick_epoch_ms = Some(now_ms());
        }
    }

    fn flush_elapsed(&mut self) {
        if let Some(last) = self.last_tick_epoch_ms {
            let now = now_ms();
            let elapsed = now.saturating_sub(last);
            self.session_ms += elapsed;
            self.last_tick_epoch_ms = Some(now);
        }
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
