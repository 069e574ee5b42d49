//! # SQLite Provider
//!
//! The Turso-backed implementation of the coaching stores. Each operation
//! opens its own connection from the shared `Database`.

use crate::errors::StorageError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::{self, Debug};
use tracing::info;
use turso::{Database, Row, Value as TursoValue};

mod plans;
mod progress;
mod questions;
mod sql;

/// A provider for interacting with a local SQLite database using Turso.
///
/// Cloning shares the same underlying database, so an in-memory database can
/// be shared between clones (e.g. in tests).
#[derive(Clone)]
pub struct SqliteProvider {
    pub db: Database,
}

impl SqliteProvider {
    /// Opens (or creates) the database at `db_path`. Use `":memory:"` for an
    /// isolated in-memory database.
    pub async fn new(db_path: &str) -> Result<Self, StorageError> {
        let db = turso::Builder::new_local(db_path).build().await?;

        // `query`, not `execute`: the pragma returns a row.
        let conn = db.connect()?;
        conn.query("PRAGMA journal_mode=WAL;", ()).await?;

        Ok(Self { db })
    }

    /// Creates every table and index that does not exist yet.
    /// Safe to call on every startup.
    pub async fn initialize_schema(&self) -> Result<(), StorageError> {
        let conn = self.db.connect()?;
        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ()).await?;
        }
        info!("Database schema is up to date.");
        Ok(())
    }
}

impl Debug for SqliteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProvider").finish_non_exhaustive()
    }
}

impl AsRef<Database> for SqliteProvider {
    fn as_ref(&self) -> &Database {
        &self.db
    }
}

// --- Value conversion helpers ---

/// The storage format for timestamps: fixed-width, microsecond precision, `Z` suffix.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn optional_text_value(value: &Option<String>) -> TursoValue {
    match value {
        Some(s) => TursoValue::Text(s.clone()),
        None => TursoValue::Null,
    }
}

fn text(row: &Row, idx: usize, column: &str) -> Result<String, StorageError> {
    match row.get_value(idx)? {
        TursoValue::Text(s) => Ok(s),
        other => Err(StorageError::DataIntegrity(format!(
            "expected text in column '{column}', found {other:?}"
        ))),
    }
}

fn optional_text(row: &Row, idx: usize, column: &str) -> Result<Option<String>, StorageError> {
    match row.get_value(idx)? {
        TursoValue::Null => Ok(None),
        TursoValue::Text(s) => Ok(Some(s)),
        other => Err(StorageError::DataIntegrity(format!(
            "expected text or null in column '{column}', found {other:?}"
        ))),
    }
}

fn integer(row: &Row, idx: usize, column: &str) -> Result<i64, StorageError> {
    match row.get_value(idx)? {
        TursoValue::Integer(i) => Ok(i),
        other => Err(StorageError::DataIntegrity(format!(
            "expected integer in column '{column}', found {other:?}"
        ))),
    }
}

/// SQLite may hand back a whole-number REAL as an INTEGER.
fn real(row: &Row, idx: usize, column: &str) -> Result<f64, StorageError> {
    match row.get_value(idx)? {
        TursoValue::Real(f) => Ok(f),
        TursoValue::Integer(i) => Ok(i as f64),
        other => Err(StorageError::DataIntegrity(format!(
            "expected real in column '{column}', found {other:?}"
        ))),
    }
}

fn timestamp(row: &Row, idx: usize, column: &str) -> Result<DateTime<Utc>, StorageError> {
    let raw = text(row, idx, column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::DataIntegrity(format!(
                "invalid timestamp '{raw}' in column '{column}': {e}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_is_fixed_width_and_sortable() {
        let early = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let late = early + chrono::Duration::microseconds(1);
        let a = format_timestamp(&early);
        let b = format_timestamp(&late);
        assert_eq!(a, "2024-01-02T03:04:05.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[tokio::test]
    async fn test_initialize_schema_is_idempotent() {
        let provider = SqliteProvider::new(":memory:").await.unwrap();
        provider.initialize_schema().await.unwrap();
        provider.initialize_schema().await.unwrap();

        let conn = provider.db.connect().unwrap();
        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('swing_questions', 'swing_feedback', 'training_plans', 'progress_metrics')",
                (),
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(integer(&row, 0, "count").unwrap(), 4);
    }
}
