use clap::Subcommand;
use momentum_core::model::WeekStatus;
use momentum_core::storage::Database;

#[derive(Subcommand)]
pub enum RoadmapAction {
    /// Show the full roadmap
    Show,
    /// Set a week's status
    SetStatus {
        /// Week ID (e.g. "week-3")
        id: String,
        /// New status: pending, current or done
        status: String,
    },
}

pub fn run(action: RoadmapAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        RoadmapAction::Show => {
            let months = db.roadmap()?;
            println!("{}", serde_json::to_string_pretty(&months)?);
        }
        RoadmapAction::SetStatus { id, status } => {
            let status = WeekStatus::parse(&status)
                .ok_or(format!("unknown status: {status} (expected pending, current or done)"))?;
            db.set_week_status(&id, status)?;
            println!("Week {id} set to {status}");
        }
    }
    Ok(())
}
