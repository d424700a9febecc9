//! Loader error types
//!
//! Every failure of the data loader is a query execution failure from the
//! caller's point of view. The variants only exist to make the diagnostic
//! message useful.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing the telemetry summary
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The database file does not exist
    #[error("Database not found: {0:?}")]
    DatabaseNotFound(PathBuf),

    /// DuckDB rejected the connection or the query
    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    /// The query could not be built from the given parameters
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Result rows could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing the output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;
