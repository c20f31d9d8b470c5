//! Foreground activity recorder loop.
//!
//! Ticks once a second and flushes the current day whenever the
//! configured flush interval has elapsed. Each flush prints one JSON
//! line so the output can be tailed or piped.

use chrono::Local;
use momentum_core::storage::Database;
use momentum_core::{ActivityRecorder, Config};
use std::time::Duration;

pub fn run(ticks: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let mut recorder = ActivityRecorder::from_config(&config);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        let mut done: u64 = 0;
        loop {
            // The first tick completes immediately, so the day is
            // recorded as soon as the watcher comes up.
            interval.tick().await;
            let today = Local::now().date_naive();
            if let Some(outcome) = recorder.maybe_flush(&db, today) {
                if let Ok(json) = serde_json::to_string(&outcome) {
                    println!("{json}");
                }
            }
            done += 1;
            if let Some(limit) = ticks {
                if done >= limit {
                    break;
                }
            }
        }
    });
    Ok(())
}
