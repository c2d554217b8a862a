mod commands;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use eventcal_core::config::EventcalConfig;
use eventcal_core::{EventStore, Frequency};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventcal")]
#[command(about = "Browse your calendar and manage one-off and recurring events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month calendar with each day's events
    Month {
        /// Year to show (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show, 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Event titles per day before collapsing into "+N more"
        #[arg(long)]
        max_per_day: Option<usize>,
    },
    /// List the events occurring on one date
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// List all stored events
    List,
    /// Show one event in detail
    Show { id: i64 },
    /// Create a new event
    New {
        /// Event title
        title: String,

        /// Start date/time (e.g., "2025-03-20" or "2025-03-20T15:00", UTC)
        #[arg(short, long)]
        start: String,

        /// End date/time; recurring events stop repeating after this date
        #[arg(short, long)]
        end: String,

        /// Event description
        #[arg(short, long)]
        description: Option<String>,

        #[command(flatten)]
        recurrence: RecurrenceArgs,
    },
    /// Change fields of an existing event
    Edit {
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[command(flatten)]
        recurrence: RecurrenceArgs,

        /// Stop repeating (keeps only the literal start/end window)
        #[arg(long, conflicts_with_all = ["frequency", "days"])]
        no_repeat: bool,
    },
    /// Delete an event
    Delete { id: i64 },
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
struct RecurrenceArgs {
    /// Repeat the event within its window
    #[arg(short, long, value_enum)]
    frequency: Option<FrequencyArg>,

    /// Weekdays for weekly events, comma-separated (e.g., "Mon,Wed")
    #[arg(long, value_delimiter = ',')]
    days: Option<Vec<String>>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FrequencyArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<FrequencyArg> for Frequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Daily => Frequency::Daily,
            FrequencyArg::Weekly => Frequency::Weekly,
            FrequencyArg::Monthly => Frequency::Monthly,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = EventcalConfig::load()?;

    match cli.command {
        Commands::Config => commands::config::run(&config),
        Commands::Month {
            year,
            month,
            max_per_day,
        } => {
            let store = open_store(&config)?;
            let max_per_day = max_per_day.unwrap_or(config.display.max_events_per_day);
            commands::month::run(&store, year, month, max_per_day)
        }
        Commands::Day { date } => commands::day::run(&open_store(&config)?, &date),
        Commands::List => commands::list::run(&open_store(&config)?),
        Commands::Show { id } => commands::show::run(&open_store(&config)?, id),
        Commands::New {
            title,
            start,
            end,
            description,
            recurrence,
        } => commands::new::run(
            &open_store(&config)?,
            title,
            start,
            end,
            description,
            recurrence.frequency.map(Frequency::from),
            recurrence.days,
        ),
        Commands::Edit {
            id,
            title,
            start,
            end,
            description,
            recurrence,
            no_repeat,
        } => commands::edit::run(
            &open_store(&config)?,
            id,
            commands::edit::Changes {
                title,
                start,
                end,
                description,
                frequency: recurrence.frequency.map(Frequency::from),
                days: recurrence.days,
                no_repeat,
            },
        ),
        Commands::Delete { id } => commands::delete::run(&open_store(&config)?, id),
    }
}

fn open_store(config: &EventcalConfig) -> Result<EventStore> {
    let path = config.database_path();
    EventStore::open(&path)
        .map_err(|e| anyhow::anyhow!("Could not open {}: {}", path.display(), e))
}
