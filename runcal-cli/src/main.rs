mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "runcal")]
#[command(about = "Turn run-calendar shift schedules into Google Calendar events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect a Google account
    Auth,
    /// List calendars the connected account can write to
    Calendars,
    /// Show the events a schedule would produce, without touching the calendar
    Preview {
        /// Schedule export file (JSON)
        file: PathBuf,

        /// Provider name to filter shifts by (prompted if omitted)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Replace synced events on the calendar with the schedule's events
    Sync {
        /// Schedule export file (JSON)
        file: PathBuf,

        /// Provider name to filter shifts by (prompted if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Target calendar id (prompted if omitted)
        #[arg(short, long)]
        calendar: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Auth => commands::auth::run().await,
        Commands::Calendars => commands::calendars::run().await,
        Commands::Preview { file, name } => commands::preview::run(&file, name.as_deref()),
        Commands::Sync {
            file,
            name,
            calendar,
            yes,
        } => commands::sync::run(&file, name.as_deref(), calendar.as_deref(), yes).await,
    }
}
