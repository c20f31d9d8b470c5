use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "momentum-cli", version, about = "Momentum dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily overview: plan day, quote, stats and completion counts
    Status {
        /// Day to report on (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Productivity stats
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Todo management
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Daily schedule tracking
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Roadmap management
    Roadmap {
        #[command(subcommand)]
        action: commands::roadmap::RoadmapAction,
    },
    /// Business metrics
    Metrics {
        #[command(subcommand)]
        action: commands::metrics::MetricsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Run the periodic activity recorder in the foreground
    Watch {
        /// Stop after this many one-second ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status { date } => commands::status::run(date),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Todo { action } => commands::todo::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Roadmap { action } => commands::roadmap::run(action),
        Commands::Metrics { action } => commands::metrics::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Watch { ticks } => commands::watch::run(ticks),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "momentum-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
