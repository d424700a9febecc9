//! JSON emission
//!
//! The dashboard build reads the loader's stdout verbatim, so the payload is
//! a single compact JSON array with nothing appended. Rows are fully encoded
//! before anything is written: a failure leaves the writer untouched.

use crate::loader::error::LoaderResult;
use crate::loader::types::RaceSummary;
use std::io::Write;

/// Encode rows as a JSON array
pub fn render_json(rows: &[RaceSummary]) -> LoaderResult<Vec<u8>> {
    Ok(serde_json::to_vec(rows)?)
}

/// Encode rows and write them to `writer` in one piece
pub fn write_summaries<W: Write>(writer: &mut W, rows: &[RaceSummary]) -> LoaderResult<()> {
    let payload = render_json(rows)?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}
