//! Summary query
//!
//! Builds the single aggregation the loader runs:
//!
//! ```text
//! SELECT circuit, race_number,
//!        COUNT(DISTINCT vehicle_id) AS vehicle_count,
//!        AVG(speed) AS avg_speed
//! FROM <table>
//! WHERE race_number IS NOT NULL AND speed IS NOT NULL
//! GROUP BY circuit, race_number
//! ORDER BY race_number DESC
//! LIMIT <limit>
//! ```

use crate::loader::error::{LoaderError, LoaderResult};

/// Fact table holding one row per telemetry reading
pub const DEFAULT_TABLE: &str = "main_marts.fact_telemetry_data";

/// Number of races reported
pub const DEFAULT_LIMIT: usize = 10;

/// Parameters of the summary aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryQuery {
    table: String,
    limit: usize,
}

impl SummaryQuery {
    /// Create a query against `table`, returning at most `limit` groups.
    ///
    /// The table name is interpolated into SQL, so it must be a plain
    /// (optionally catalog/schema qualified) identifier.
    pub fn new(table: impl Into<String>, limit: usize) -> LoaderResult<Self> {
        let table = table.into();
        validate_table_name(&table)?;
        if limit == 0 {
            return Err(LoaderError::InvalidQuery(
                "limit must be at least 1".to_string(),
            ));
        }
        Ok(Self { table, limit })
    }

    /// Fact table being summarized
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Maximum number of groups returned
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Render the SQL text
    pub fn sql(&self) -> String {
        format!(
            "SELECT \
                circuit, \
                race_number, \
                COUNT(DISTINCT vehicle_id) AS vehicle_count, \
                AVG(speed) AS avg_speed \
             FROM {} \
             WHERE race_number IS NOT NULL AND speed IS NOT NULL \
             GROUP BY circuit, race_number \
             ORDER BY race_number DESC, circuit \
             LIMIT {}",
            self.table, self.limit
        )
    }
}

impl Default for SummaryQuery {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Check that `name` is `ident`, `schema.ident` or `catalog.schema.ident`
pub fn validate_table_name(name: &str) -> LoaderResult<()> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 3 {
        return Err(LoaderError::InvalidQuery(format!(
            "table name has too many parts: {}",
            name
        )));
    }

    for part in parts {
        if !is_identifier(part) {
            return Err(LoaderError::InvalidQuery(format!(
                "invalid table name: {:?}",
                name
            )));
        }
    }

    Ok(())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
