//! Telemetry Summary Loader
//!
//! Data loader invoked by the dashboard build. One run performs:
//!
//! ```text
//! open (read-only) → summary query → encode JSON → write stdout
//! ```
//!
//! Any failure surfaces as a [`LoaderError`]; the binaries report it on
//! stderr and exit non-zero, leaving stdout empty.
//!
//! # Example
//!
//! ```rust,no_run
//! use race_dashboard::loader::{run, SummaryQuery};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stdout = std::io::stdout();
//!     run(Path::new("../../dev.duckdb"), &SummaryQuery::default(), &mut stdout.lock())?;
//!     Ok(())
//! }
//! ```

mod error;
mod output;
mod query;
mod source;
mod types;

use std::io::Write;
use std::path::Path;

pub use error::{LoaderError, LoaderResult};
pub use output::{render_json, write_summaries};
pub use query::{validate_table_name, SummaryQuery, DEFAULT_LIMIT, DEFAULT_TABLE};
pub use source::{fetch_summaries, load_summaries, open_read_only};
pub use types::RaceSummary;

/// Run the whole loader against `database`, writing JSON to `writer`.
///
/// Returns the number of rows written.
pub fn run<W: Write>(database: &Path, query: &SummaryQuery, writer: &mut W) -> LoaderResult<usize> {
    let rows = load_summaries(database, query)?;
    write_summaries(writer, &rows)?;
    tracing::info!("Wrote {} race summaries from {:?}", rows.len(), database);
    Ok(rows.len())
}
