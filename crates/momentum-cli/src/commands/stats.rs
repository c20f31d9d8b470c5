use chrono::NaiveDate;
use clap::Subcommand;
use momentum_core::storage::Database;
use momentum_core::{Config, Dashboard};
use serde::Serialize;

#[derive(Serialize)]
struct HistoryEntry {
    date: NaiveDate,
    score: f64,
}

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's productivity stats
    Today,
    /// Stats for a specific day
    Day {
        /// Day (YYYY-MM-DD)
        date: String,
    },
    /// All recorded daily scores, oldest first
    History,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Today => {
            print_stats(db, super::date_arg(None)?)?;
        }
        StatsAction::Day { date } => {
            print_stats(db, super::date_arg(Some(date))?)?;
        }
        StatsAction::History => {
            let mut entries: Vec<HistoryEntry> = db
                .score_history()?
                .into_iter()
                .map(|(date, score)| HistoryEntry { date, score })
                .collect();
            entries.sort_by_key(|e| e.date);
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn print_stats(db: Database, date: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let dashboard = Dashboard::with_streak_policy(db, config.streak_policy());
    let stats = dashboard.productivity_stats(date);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
