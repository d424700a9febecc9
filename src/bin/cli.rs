//! Race Dashboard CLI
//!
//! Command-line interface for the dashboard configuration:
//! - Generate a default config
//! - Export the framework config as JSON
//! - List and validate pages
//! - Run the telemetry summary loader

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use race_dashboard::{generate_default_config, logging, Config};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "race-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Configuration and data loaders for the race telemetry dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the dashboard framework config as JSON
    Framework {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List dashboard pages
    Pages,

    /// Check the configuration for errors
    Validate,

    /// Run the telemetry summary loader
    Load {
        /// Database file (default: loader.database from config)
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // Generating a fresh config must work even when the existing one is broken
        Commands::Config { output } => emit(output.as_deref(), &generate_default_config()),
        command => {
            let config = Config::resolve(cli.config.as_deref())
                .context("Failed to load configuration")?;
            logging::init(&config.logging);
            run_with_config(command, &config)
        }
    }
}

fn run_with_config(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Config { output } => emit(output.as_deref(), &generate_default_config())?,

        Commands::Framework { output } => {
            config.validate()?;
            let json = config.framework_config().to_json_pretty()?;
            emit(output.as_deref(), &json)?;
        }

        Commands::Pages => {
            println!("{}", config.title);
            println!();
            println!("{:<32} {}", "Name", "Path");
            println!("{}", "-".repeat(60));
            for page in &config.pages {
                println!("{:<32} {}", page.name, page.path);
            }
        }

        Commands::Validate => {
            config.validate()?;
            println!("Configuration OK ({} pages)", config.pages.len());
        }

        Commands::Load { database } => {
            let database = database.unwrap_or_else(|| config.loader.database_path());
            let query = config.loader.summary_query()?;
            let stdout = std::io::stdout();
            race_dashboard::loader::run(&database, &query, &mut stdout.lock())
                .with_context(|| format!("Telemetry summary failed for {:?}", database))?;
        }
    }

    Ok(())
}

fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {:?}", path))?;
            eprintln!("Wrote {:?}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}
