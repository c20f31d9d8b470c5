//! Daily schedule commands for CLI.

use chrono::Local;
use clap::Subcommand;
use momentum_core::model::ScheduleSlot;
use momentum_core::storage::Database;
use serde::Serialize;

#[derive(Serialize)]
struct SlotView {
    #[serde(flatten)]
    slot: ScheduleSlot,
    completed: bool,
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show the schedule with completion marks for a day
    Show {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark a slot completed for a day
    Check {
        /// Slot ID
        id: String,
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Clear a slot completion for a day
    Uncheck {
        /// Slot ID
        id: String,
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        ScheduleAction::Show { date } => {
            let date = super::date_arg(date)?;
            let completed = db.schedule_completions(date)?;
            let views: Vec<SlotView> = db
                .schedule()?
                .into_iter()
                .map(|slot| SlotView {
                    completed: completed.contains(&slot.id),
                    slot,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        ScheduleAction::Check { id, date } => {
            let date = super::date_arg(date)?;
            db.set_slot_completed(&id, date, true)?;
            println!("Slot checked: {id}");
            super::record_action(&db, Local::now().date_naive());
        }
        ScheduleAction::Uncheck { id, date } => {
            let date = super::date_arg(date)?;
            db.set_slot_completed(&id, date, false)?;
            println!("Slot unchecked: {id}");
            super::record_action(&db, Local::now().date_naive());
        }
    }
    Ok(())
}
