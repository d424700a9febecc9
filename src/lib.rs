//! # Race Dashboard
//!
//! Configuration and data loaders for a static-site race telemetry dashboard.
//!
//! The dashboard framework reads a configuration object (title, pages,
//! database location, injected stylesheet) and runs data loaders at build
//! time. This crate provides both: the configuration in TOML form, exportable
//! as the JSON object the framework consumes, and the telemetry summary
//! loader that queries a local DuckDB file read-only and prints JSON.
//!
//! ## Modules
//!
//! - [`config`]: Dashboard, loader and logging configuration
//! - [`loader`]: Telemetry summary data loader
//! - [`logging`]: stderr-only tracing setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use race_dashboard::{Config, loader};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let query = config.loader.summary_query()?;
//!
//!     let rows = loader::load_summaries(&config.loader.database_path(), &query)?;
//!     println!("Found {} races", rows.len());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod loader;
pub mod logging;

pub use config::{
    generate_default_config, Config, ConfigError, DuckDbConfig, FrameworkConfig, LoaderConfig,
    LoggingConfig, Page,
};

pub use loader::{LoaderError, LoaderResult, RaceSummary, SummaryQuery};
