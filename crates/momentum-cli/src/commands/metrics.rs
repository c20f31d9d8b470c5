use clap::Subcommand;
use momentum_core::model::DailyMetrics;
use momentum_core::storage::Database;

#[derive(Subcommand)]
pub enum MetricsAction {
    /// Show the latest metrics snapshot
    Latest,
    /// Record metrics for a day, carrying forward unspecified fields
    Record {
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Monthly revenue in whole currency units
        #[arg(long)]
        revenue: Option<i64>,
        /// Instagram follower count
        #[arg(long)]
        instagram: Option<i64>,
        /// YouTube subscriber count
        #[arg(long)]
        youtube: Option<i64>,
        /// Number of products live
        #[arg(long)]
        products: Option<i64>,
    },
}

pub fn run(action: MetricsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        MetricsAction::Latest => match db.latest_metrics()? {
            Some(metrics) => println!("{}", serde_json::to_string_pretty(&metrics)?),
            None => println!("No metrics recorded yet"),
        },
        MetricsAction::Record {
            date,
            revenue,
            instagram,
            youtube,
            products,
        } => {
            let date = super::date_arg(date)?;
            let mut metrics = db.latest_metrics()?.unwrap_or(DailyMetrics {
                date,
                revenue: 0,
                followers_instagram: 0,
                followers_youtube: 0,
                products_live: 0,
            });
            metrics.date = date;
            if let Some(r) = revenue {
                metrics.revenue = r;
            }
            if let Some(f) = instagram {
                metrics.followers_instagram = f;
            }
            if let Some(f) = youtube {
                metrics.followers_youtube = f;
            }
            if let Some(p) = products {
                metrics.products_live = p;
            }
            db.upsert_metrics(&metrics)?;
            println!("Metrics recorded:");
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
    }
    Ok(())
}
