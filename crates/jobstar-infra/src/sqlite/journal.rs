//! Event journal on the `ledger_events` table.
//!
//! Stores call [`append_event`] inside their own write transaction, so an
//! event row exists if and only if the state change it describes committed.
//! `sequence` is the table's rowid; rows are never deleted, which keeps it
//! dense from 1.

use chrono::Utc;
use jobstar_types::error::RepositoryError;
use jobstar_types::event::{EventKind, LedgerEvent, RecordedEvent};
use sqlx::{Row, SqliteConnection};

use super::pool::DatabasePool;
use super::{format_datetime, from_sql_id, parse_datetime, query_error};

/// Append `event` to the journal on the given (transaction) connection.
pub(crate) async fn append_event(
    conn: &mut SqliteConnection,
    event: LedgerEvent,
) -> Result<RecordedEvent, RepositoryError> {
    let payload = serde_json::to_string(&event)
        .map_err(|e| RepositoryError::Query(format!("failed to encode event: {e}")))?;
    let recorded_at = Utc::now();

    let result = sqlx::query(
        "INSERT INTO ledger_events (kind, payload, recorded_at) VALUES (?, ?, ?)",
    )
    .bind(event.kind().as_str())
    .bind(&payload)
    .bind(format_datetime(&recorded_at))
    .execute(&mut *conn)
    .await
    .map_err(query_error)?;

    Ok(RecordedEvent {
        sequence: from_sql_id(result.last_insert_rowid())?,
        recorded_at,
        event,
    })
}

/// Journal entries in commit order, optionally restricted to one kind.
pub(crate) async fn list_events(
    pool: &DatabasePool,
    kind: Option<EventKind>,
) -> Result<Vec<RecordedEvent>, RepositoryError> {
    let rows = match kind {
        Some(kind) => {
            sqlx::query(
                "SELECT sequence, payload, recorded_at FROM ledger_events WHERE kind = ? ORDER BY sequence",
            )
            .bind(kind.as_str())
            .fetch_all(&pool.reader)
            .await
        }
        None => {
            sqlx::query("SELECT sequence, payload, recorded_at FROM ledger_events ORDER BY sequence")
                .fetch_all(&pool.reader)
                .await
        }
    }
    .map_err(query_error)?;

    rows.iter().map(event_from_row).collect()
}

fn event_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<RecordedEvent, RepositoryError> {
    let sequence: i64 = row.try_get("sequence").map_err(query_error)?;
    let payload: String = row.try_get("payload").map_err(query_error)?;
    let recorded_at: String = row.try_get("recorded_at").map_err(query_error)?;

    let event: LedgerEvent = serde_json::from_str(&payload)
        .map_err(|e| RepositoryError::Query(format!("invalid event payload: {e}")))?;

    Ok(RecordedEvent {
        sequence: from_sql_id(sequence)?,
        recorded_at: parse_datetime(&recorded_at)?,
        event,
    })
}
