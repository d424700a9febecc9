//! Telemetry summary data loader
//!
//! Invoked by the dashboard build with no arguments. Opens the configured
//! DuckDB database read-only, summarizes the most recent races and writes a
//! JSON array to stdout. On failure the error goes to stderr, stdout stays
//! empty and the exit status is 1.

use clap::Parser;
use race_dashboard::{logging, Config};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "telemetry-summary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Summarize recent races from the telemetry database as JSON")]
struct Args {
    /// Database file (default: loader.database from config)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::resolve(args.config.as_deref())?;
    logging::init(&config.logging);

    let database = args
        .database
        .unwrap_or_else(|| config.loader.database_path());
    let query = config.loader.summary_query()?;

    let stdout = std::io::stdout();
    race_dashboard::loader::run(&database, &query, &mut stdout.lock())?;
    Ok(())
}
