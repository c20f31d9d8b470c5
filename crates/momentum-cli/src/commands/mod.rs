//! CLI subcommand implementations.

use chrono::{Local, NaiveDate};
use momentum_core::storage::Database;
use momentum_core::{ActivityRecorder, Config};

pub mod config;
pub mod habit;
pub mod metrics;
pub mod roadmap;
pub mod schedule;
pub mod stats;
pub mod status;
pub mod timer;
pub mod todo;
pub mod watch;

/// Resolve an optional YYYY-MM-DD argument, defaulting to today.
pub(crate) fn date_arg(date: Option<String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(s) => {
            let parsed = s
                .parse::<NaiveDate>()
                .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))?;
            Ok(parsed)
        }
        None => Ok(Local::now().date_naive()),
    }
}

/// Best-effort activity flush after a scoring-relevant action. Failures
/// are logged and dropped inside the recorder.
pub(crate) fn record_action(db: &Database, date: NaiveDate) {
    let config = Config::load_or_default();
    let mut recorder = ActivityRecorder::from_config(&config);
    recorder.record_action(db, date);
}
