//! Read-only DuckDB access
//!
//! Opens the analytics database without write access and runs the summary
//! query against it.

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::query::SummaryQuery;
use crate::loader::types::RaceSummary;
use duckdb::{AccessMode, Config, Connection};
use std::path::Path;
use std::time::Instant;

/// Open `path` in read-only mode.
///
/// DuckDB creates missing files when opening, which a read-only open then
/// rejects with a less useful message, so absence is checked first.
pub fn open_read_only(path: &Path) -> LoaderResult<Connection> {
    if !path.is_file() {
        return Err(LoaderError::DatabaseNotFound(path.to_path_buf()));
    }

    let config = Config::default().access_mode(AccessMode::ReadOnly)?;
    let conn = Connection::open_with_flags(path, config)?;

    tracing::debug!("Opened {:?} read-only", path);
    Ok(conn)
}

/// Run the summary query on an open connection
pub fn fetch_summaries(conn: &Connection, query: &SummaryQuery) -> LoaderResult<Vec<RaceSummary>> {
    let start = Instant::now();
    let sql = query.sql();
    tracing::trace!(sql = %sql, "Executing summary query");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(RaceSummary {
                circuit: row.get("circuit")?,
                race_number: row.get("race_number")?,
                vehicle_count: row.get("vehicle_count")?,
                avg_speed: row.get("avg_speed")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "Summary query on {} returned {} rows in {}ms",
        query.table(),
        rows.len(),
        start.elapsed().as_millis()
    );

    Ok(rows)
}

/// Open the database, run the query and release the connection
pub fn load_summaries(path: &Path, query: &SummaryQuery) -> LoaderResult<Vec<RaceSummary>> {
    let conn = open_read_only(path)?;
    fetch_summaries(&conn, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::testing::{create_fixture, TelemetryRow};
    use tempfile::tempdir;

    fn row(circuit: &str, race: i64, vehicle: &str, speed: f64) -> TelemetryRow {
        TelemetryRow::new(Some(circuit), Some(race), vehicle, Some(speed))
    }

    #[test]
    fn test_suzuka_example() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dev.duckdb");
        create_fixture(
            &path,
            &[row("Suzuka", 5, "A", 180.0), row("Suzuka", 5, "B", 200.0)],
        )
        .unwrap();

        let rows = load_summaries(&path, &SummaryQuery::default()).unwrap();
        assert_eq!(rows, vec![RaceSummary::new("Suzuka", 5, 2, 190.0)]);
    }

    #[test]
    fn test_limit_and_descending_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dev.duckdb");

        // 12 races over two circuits, one group per race
        let rows: Vec<TelemetryRow> = (1..=12)
            .map(|race| {
                let circuit = if race % 2 == 0 { "Sebring" } else { "COTA" };
                row(circuit, race, "A", 150.0 + race as f64)
            })
            .collect();
        create_fixture(&path, &rows).unwrap();

        let summaries = load_summaries(&path, &SummaryQuery::default()).unwrap();
        assert_eq!(summaries.len(), 10);
        assert_eq!(summaries[0].race_number, 12);
        assert_eq!(summaries[9].race_number, 3);
        for pair in summaries.windows(2) {
            assert!(pair[0].race_number >= pair[1].race_number);
        }
    }

    #[test]
    fn test_fewer_groups_than_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dev.duckdb");
        create_fixture(
            &path,
            &[
                row("VIR", 2, "B", 140.0),
                row("Road America", 1, "A", 120.0),
                row("Road America", 2, "A", 130.0),
            ],
        )
        .unwrap();

        let summaries = load_summaries(&path, &SummaryQuery::default()).unwrap();
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].race_number, 2);
        assert_eq!(summaries[1].race_number, 2);
        assert_eq!(summaries[2].race_number, 1);

        // Same race number: ordered by circuit
        let circuits: Vec<_> = summaries[..2].iter().map(|s| s.circuit.as_deref()).collect();
        assert_eq!(circuits, vec![Some("Road America"), Some("VIR")]);
    }

    #[test]
    fn test_distinct_vehicle_count_and_average() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dev.duckdb");
        create_fixture(
            &path,
            &[
                row("Barber", 7, "13", 100.0),
                row("Barber", 7, "13", 110.0),
                row("Barber", 7, "22", 120.0),
                row("Barber", 7, "46", 130.0),
            ],
        )
        .unwrap();

        let summaries = load_summaries(&path, &SummaryQuery::default()).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].vehicle_count, 3);
        assert!((summaries[0].avg_speed - 115.0).abs() < 1e-9);
    }

    #[test]
    fn test_null_rows_excluded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dev.duckdb");
        create_fixture(
            &path,
            &[
                row("Sonoma", 3, "A", 100.0),
                TelemetryRow::new(Some("Sonoma"), Some(3), "B", None),
                TelemetryRow::new(Some("Sonoma"), None, "C", Some(999.0)),
                TelemetryRow::new(Some("Indianapolis"), None, "D", Some(250.0)),
            ],
        )
        .unwrap();

        let summaries = load_summaries(&path, &SummaryQuery::default()).unwrap();
        assert_eq!(summaries, vec![RaceSummary::new("Sonoma", 3, 1, 100.0)]);
    }

    #[test]
    fn test_custom_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dev.duckdb");
        let rows: Vec<TelemetryRow> = (1..=5).map(|race| row("COTA", race, "A", 160.0)).collect();
        create_fixture(&path, &rows).unwrap();

        let query = SummaryQuery::new(crate::loader::DEFAULT_TABLE, 2).unwrap();
        let summaries = load_summaries(&path, &query).unwrap();
        assert_eq!(
            summaries.iter().map(|s| s.race_number).collect::<Vec<_>>(),
            vec![5, 4]
        );
    }

    #[test]
    fn test_missing_database() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.duckdb");

        let err = load_summaries(&path, &SummaryQuery::default()).unwrap_err();
        assert!(matches!(err, LoaderError::DatabaseNotFound(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.duckdb");
        drop(Connection::open(&path).unwrap());

        let err = load_summaries(&path, &SummaryQuery::default()).unwrap_err();
        assert!(matches!(err, LoaderError::Database(_)));
    }

    #[test]
    fn test_connection_is_read_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dev.duckdb");
        create_fixture(&path, &[row("Suzuka", 1, "A", 100.0)]).unwrap();

        let conn = open_read_only(&path).unwrap();
        let result = conn.execute_batch("CREATE TABLE scratch (x INTEGER)");
        assert!(result.is_err());
    }
}
