//! Habit tracking commands for CLI.
//!
//! Habit completions are set-membership per day and intentionally do not
//! feed the productivity score, so no activity flush happens here.

use clap::Subcommand;
use momentum_core::storage::Database;
use serde::Serialize;

#[derive(Serialize)]
struct HabitView {
    id: String,
    name: String,
    completed: bool,
}

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits with completion state for a day
    List {
        /// Day to list (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Add a habit
    Add {
        /// Habit name
        name: String,
    },
    /// Mark a habit completed for a day
    Check {
        /// Habit ID
        id: String,
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Clear a habit completion for a day
    Uncheck {
        /// Habit ID
        id: String,
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        HabitAction::List { date } => {
            let date = super::date_arg(date)?;
            let completed = db.habit_completions(date)?;
            let views: Vec<HabitView> = db
                .habits()?
                .into_iter()
                .map(|h| HabitView {
                    completed: completed.contains(&h.id),
                    id: h.id,
                    name: h.name,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        HabitAction::Add { name } => {
            let habit = db.add_habit(&name)?;
            println!("Habit added: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Check { id, date } => {
            let date = super::date_arg(date)?;
            db.set_habit_completed(&id, date, true)?;
            println!("Habit checked: {id}");
        }
        HabitAction::Uncheck { id, date } => {
            let date = super::date_arg(date)?;
            db.set_habit_completed(&id, date, false)?;
            println!("Habit unchecked: {id}");
        }
    }
    Ok(())
}
