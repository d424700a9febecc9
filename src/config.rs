//! Configuration System
//!
//! Handles loading the dashboard configuration from TOML files and
//! environment variables. The `title`, `pages`, `duckdb` and `head` keys are
//! the ones the dashboard framework reads; `loader` and `logging` only affect
//! the data loaders in this crate.

use crate::loader::{validate_table_name, SummaryQuery, DEFAULT_LIMIT, DEFAULT_TABLE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_pages")]
    pub pages: Vec<Page>,

    #[serde(default)]
    pub duckdb: DuckDbConfig,

    #[serde(default = "default_head")]
    pub head: String,

    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A dashboard page: sidebar label and route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    pub path: String,
}

impl Page {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

fn default_title() -> String {
    "Toyota Gazoo Racing Analytics".to_string()
}

fn default_pages() -> Vec<Page> {
    vec![
        Page::new("Overview", "/index"),
        Page::new("Telemetry Analysis", "/telemetry"),
        Page::new("Race Analysis", "/race-analysis"),
        Page::new("Lap Insights", "/lap-insights"),
        Page::new("Wind Conditions", "/fact-wind"),
        Page::new("Track Map", "/track-map"),
        Page::new("Driver Consistency Analysis", "/driver-consistency"),
    ]
}

fn default_head() -> String {
    r#"<link rel="stylesheet" type="text/css" href="./custom.css">"#.to_string()
}

/// Database location as seen by the dashboard framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuckDbConfig {
    /// Relative to the framework's source root
    #[serde(default = "default_duckdb_path")]
    pub path: String,
}

fn default_duckdb_path() -> String {
    "../dev.duckdb".to_string()
}

impl Default for DuckDbConfig {
    fn default() -> Self {
        Self {
            path: default_duckdb_path(),
        }
    }
}

/// Data loader configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    /// Database opened by the loader, relative to the loader's working directory
    #[serde(default = "default_loader_database")]
    pub database: String,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_loader_database() -> String {
    "../../dev.duckdb".to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            database: default_loader_database(),
            table: default_table(),
            limit: default_limit(),
        }
    }
}

impl LoaderConfig {
    /// Build the summary query described by this section
    pub fn summary_query(&self) -> Result<SummaryQuery, ConfigError> {
        SummaryQuery::new(self.table.clone(), self.limit)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.database)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

// Loaders run inside the dashboard build; keep them quiet unless asked.
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// The configuration object handed to the dashboard framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkConfig {
    pub title: String,
    pub pages: Vec<Page>,
    pub duckdb: DuckDbConfig,
    pub head: String,
}

impl FrameworkConfig {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// The first config file found is used; if it cannot be read or parsed
    /// the error is returned rather than falling back to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("race-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/race-dashboard/config.toml")),
            Some(PathBuf::from("./race-dashboard.toml")),
        ];

        match config_paths.iter().flatten().find(|p| p.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::debug!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::debug!("Using default config with environment overrides");
                Self::from_env()
            }
        }
    }

    /// Load `path` if given, otherwise search the default locations
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Self::load_default(),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(title) = var("RACE_DASHBOARD_TITLE") {
            self.title = title;
        }
        if let Some(path) = var("RACE_DASHBOARD_DUCKDB_PATH") {
            self.duckdb.path = path;
        }

        // Loader overrides
        if let Some(database) = var("RACE_DASHBOARD_DATABASE") {
            self.loader.database = database;
        }
        if let Some(table) = var("RACE_DASHBOARD_TABLE") {
            self.loader.table = table;
        }
        if let Some(limit) = var("RACE_DASHBOARD_LIMIT") {
            self.loader.limit = limit.parse().map_err(|_| {
                ConfigError::Invalid(format!("RACE_DASHBOARD_LIMIT is not a number: {:?}", limit))
            })?;
        }

        // Logging overrides
        if let Some(level) = var("RACE_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("RACE_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Check the configuration for problems the framework or loader would hit
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.title.trim().is_empty() {
            problems.push("title is empty".to_string());
        }

        if self.pages.is_empty() {
            problems.push("no pages configured".to_string());
        }

        let mut seen = HashSet::new();
        for page in &self.pages {
            if page.name.trim().is_empty() {
                problems.push(format!("page {:?} has an empty name", page.path));
            }
            if !page.path.starts_with('/') {
                problems.push(format!(
                    "page {:?} path must start with '/': {:?}",
                    page.name, page.path
                ));
            }
            if !seen.insert(page.path.as_str()) {
                problems.push(format!("duplicate page path: {:?}", page.path));
            }
        }

        if self.duckdb.path.trim().is_empty() {
            problems.push("duckdb.path is empty".to_string());
        }
        if self.loader.database.trim().is_empty() {
            problems.push("loader.database is empty".to_string());
        }
        if let Err(e) = validate_table_name(&self.loader.table) {
            problems.push(format!("loader.table: {}", e));
        }
        if self.loader.limit == 0 {
            problems.push("loader.limit must be at least 1".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }

    /// The subset of the configuration the dashboard framework consumes
    pub fn framework_config(&self) -> FrameworkConfig {
        FrameworkConfig {
            title: self.title.clone(),
            pages: self.pages.clone(),
            duckdb: self.duckdb.clone(),
            head: self.head.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: default_title(),
            pages: default_pages(),
            duckdb: DuckDbConfig::default(),
            head: default_head(),
            loader: LoaderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Race Dashboard Configuration
#
# Environment variables override these settings:
# - RACE_DASHBOARD_TITLE
# - RACE_DASHBOARD_DUCKDB_PATH
# - RACE_DASHBOARD_DATABASE
# - RACE_DASHBOARD_TABLE
# - RACE_DASHBOARD_LIMIT
# - RACE_DASHBOARD_LOG_LEVEL
# - RACE_DASHBOARD_LOG_FORMAT

# Dashboard title
title = "Toyota Gazoo Racing Analytics"

# Stylesheet injected into every generated page
head = '<link rel="stylesheet" type="text/css" href="./custom.css">'

# Sidebar pages, in order
pages = [
    { name = "Overview", path = "/index" },
    { name = "Telemetry Analysis", path = "/telemetry" },
    { name = "Race Analysis", path = "/race-analysis" },
    { name = "Lap Insights", path = "/lap-insights" },
    { name = "Wind Conditions", path = "/fact-wind" },
    { name = "Track Map", path = "/track-map" },
    { name = "Driver Consistency Analysis", path = "/driver-consistency" },
]

[duckdb]
# Database used by the dashboard, relative to the source root
path = "../dev.duckdb"

[loader]
# Database opened (read-only) by the data loader
database = "../../dev.duckdb"

# Fact table with one row per telemetry reading
table = "main_marts.fact_telemetry_data"

# Number of most recent races to summarize
limit = 10

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
