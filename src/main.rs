mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roster-ical")]
#[command(about = "Turn a weekly duty roster spreadsheet into an iCalendar file")]
struct Cli {
    /// Log conversion details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the employees found in a roster
    Employees {
        /// Roster file (defaults to the first "Duty Roster*.xlsx" in the current directory)
        file: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the week label and the dated day columns of a roster
    Week {
        /// Roster file (defaults to the first "Duty Roster*.xlsx" in the current directory)
        file: Option<PathBuf>,

        /// Year to assign to the roster's days (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Convert one employee's shifts into an .ics file
    Convert {
        /// Roster file (defaults to the first "Duty Roster*.xlsx" in the current directory)
        file: Option<PathBuf>,

        /// Employee name or part of it (defaults to `employee` from config)
        #[arg(short, long)]
        employee: Option<String>,

        /// Output .ics path (defaults to sushi_schedule_week_<date>.ics in output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Year to assign to the roster's days (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Time zone for shift times (e.g., "Pacific/Auckland")
        #[arg(long)]
        timezone: Option<String>,
    },
    /// List the events in an .ics file
    Inspect {
        /// Calendar file to read
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Employees { file, json } => commands::employees::run(file, json),
        Commands::Week { file, year } => commands::week::run(file, year),
        Commands::Convert {
            file,
            employee,
            output,
            year,
            timezone,
        } => commands::convert::run(commands::convert::ConvertArgs {
            file,
            employee,
            output,
            year,
            timezone,
        }),
        Commands::Inspect { file } => commands::inspect::run(&file),
    }
}

/// Log to stderr, filtered by RUST_LOG when it is set
fn init_tracing(verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(verbose, env.as_deref()))
        .init();
}

/// RUST_LOG directives, or warn when unset or invalid; --verbose adds debug
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    let filter = env
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}
