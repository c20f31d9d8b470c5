//! Daily activity recorder.
//!
//! Gathers the day's counters (schedule completions, todos, focus seconds
//! including any in-progress timer session) and upserts them into the
//! activity log keyed by date, freezing the score in the same write.
//!
//! Recording is best-effort: nothing here retries or queues. A failed
//! flush is logged and dropped, and the next flush simply writes the
//! newest full state over whatever is there (last writer wins). Periodic
//! flushes are rate-limited; flushes after user actions go straight through.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::Result;
use crate::stats::{DayCounters, ProductivityStats, ScoreWeights, StreakPolicy, FOCUS_TARGET_SECS};
use crate::storage::{Config, Database};

/// What a successful flush wrote and the stats that followed from it.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct FlushOutcome {
    pub date: NaiveDate,
    pub counters: DayCounters,
    pub score: f64,
    pub stats: ProductivityStats,
}

/// Best-effort writer of the daily activity log.
pub struct ActivityRecorder {
    weights: ScoreWeights,
    focus_target_secs: u64,
    streak_policy: StreakPolicy,
    flush_interval: Duration,
    last_flush: Option<DateTime<Utc>>,
}

impl ActivityRecorder {
    pub fn new(weights: ScoreWeights, streak_policy: StreakPolicy) -> Self {
        Self {
            weights,
            focus_target_secs: FOCUS_TARGET_SECS,
            streak_policy,
            flush_interval: Duration::seconds(30),
            last_flush: None,
        }
    }

    /// Build a recorder from configuration. Invalid weights are replaced
    /// with the balanced default rather than refusing to record.
    pub fn from_config(config: &Config) -> Self {
        let mut weights = config.score_weights();
        if let Err(e) = weights.validate() {
            tracing::warn!(error = %e, "invalid score weights in config, using balanced");
            weights = ScoreWeights::balanced();
        }
        Self {
            weights,
            focus_target_secs: config.scoring.focus_target_secs,
            streak_policy: config.streak_policy(),
            flush_interval: Duration::seconds(config.recorder.flush_interval_secs as i64),
            last_flush: None,
        }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn streak_policy(&self) -> &StreakPolicy {
        &self.streak_policy
    }

    /// Gather the full day state and upsert it, returning what was written.
    ///
    /// The persisted focus timer is rolled to `date` and ticked first, so
    /// an in-progress session counts up to this moment; the rolled state is
    /// saved back so day boundaries stick.
    pub fn flush_now(&mut self, db: &Database, date: NaiveDate) -> Result<FlushOutcome> {
        let mut timer = db.load_timer(date)?;
        timer.roll_to(date);
        timer.tick();
        db.save_timer(&timer)?;

        let mut counters = db.day_counters(date)?;
        counters.focus_seconds = timer.total_secs();

        let log = db.upsert_daily_activity(date, &counters, &self.weights, self.focus_target_secs)?;
        let stats = db.productivity_stats(date, &self.streak_policy)?;
        self.last_flush = Some(Utc::now());

        Ok(FlushOutcome {
            date,
            counters,
            score: log.score,
            stats,
        })
    }

    /// Flush after a user action. Failures are logged and dropped; the
    /// action itself has already succeeded and must not be rolled back.
    pub fn record_action(&mut self, db: &Database, date: NaiveDate) -> Option<FlushOutcome> {
        match self.flush_now(db, date) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::warn!(error = %e, %date, "dropping failed activity flush");
                None
            }
        }
    }

    /// Periodic flush, rate-limited to the configured interval. Returns
    /// `None` when skipped or failed; failures are logged and dropped.
    pub fn maybe_flush(&mut self, db: &Database, date: NaiveDate) -> Option<FlushOutcome> {
        if !self.flush_due(Utc::now()) {
            return None;
        }
        self.record_action(db, date)
    }

    fn flush_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_flush {
            Some(last) => now - last >= self.flush_interval,
            None => true,
        }
    }
}
