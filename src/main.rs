mod commands;
mod config;
mod render;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::commands::{EventFields, FilterArgs};
use crate::config::DaycalConfig;
use crate::store::EventStore;

#[derive(Parser)]
#[command(name = "daycal")]
#[command(version, about = "A local calendar with recurring events and conflict checks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an event (rejected if it overlaps an existing one)
    New {
        title: String,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Change an event's title, time, category or recurrence
    Edit {
        /// Event id (a unique prefix is enough)
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event
    Delete {
        /// Event id (a unique prefix is enough)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Move a one-off event to another day, keeping its time
    Move {
        /// Event id (a unique prefix is enough)
        id: String,

        /// Target day (YYYY-MM-DD)
        date: String,
    },
    /// Show a month grid
    Month {
        /// Month to show (YYYY-MM, defaults to the current month)
        month: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show the week containing a day
    Week {
        /// Any day in the week (YYYY-MM-DD, defaults to today)
        date: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show a single day
    Day {
        /// Day to show (YYYY-MM-DD, defaults to today)
        date: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List events with their ids
    Events {
        /// List events from this date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        from: Option<String>,

        /// List events until this date (YYYY-MM-DD, defaults to a week from --from)
        #[arg(long)]
        to: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show config and data paths
    Config,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    let cfg = DaycalConfig::load()?;
    let open_store = || -> Result<EventStore> {
        let store = EventStore::open(cfg.events_path())?;
        tracing::debug!(path = %store.path().display(), "opened event store");
        Ok(store)
    };

    match command {
        Commands::New { title, fields } => commands::new::run(&mut open_store()?, &cfg, title, fields),
        Commands::Edit { id, title, fields } => commands::edit::run(&mut open_store()?, &id, title, fields),
        Commands::Delete { id, yes } => commands::delete::run(&mut open_store()?, &id, yes),
        Commands::Move { id, date } => commands::reschedule::run(&mut open_store()?, &id, &date),
        Commands::Month { month, filter } => commands::month::run(&open_store()?, &filter, month.as_deref()),
        Commands::Week { date, filter } => commands::week::run(&open_store()?, &filter, date.as_deref()),
        Commands::Day { date, filter } => commands::day::run(&open_store()?, &filter, date.as_deref()),
        Commands::Events { from, to, filter } => {
            commands::events::run(&open_store()?, &filter, from.as_deref(), to.as_deref())
        }
        Commands::Config => commands::config::run(&cfg),
    }
}
