//! Focus timer commands for CLI.
//!
//! The timer is wall-clock based and persisted in the kv store, so
//! sessions survive across invocations and machine sleep.

use chrono::Local;
use clap::Subcommand;
use momentum_core::storage::Database;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the focus clock
    Start,
    /// Stop the focus clock and record the day
    Stop,
    /// Print current timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let today = Local::now().date_naive();
    let mut timer = db.load_timer(today)?;
    timer.roll_to(today);

    match action {
        TimerAction::Start => {
            timer.start();
            db.save_timer(&timer)?;
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
        TimerAction::Stop => {
            timer.stop();
            db.save_timer(&timer)?;
            super::record_action(&db, today);
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
        TimerAction::Status => {
            // Tick to fold elapsed wall time into the session
            timer.tick();
            db.save_timer(&timer)?;
            println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
        }
    }
    Ok(())
}
