//! SQLite storage layer.
//!
//! Store implementations backed by SQLite with WAL mode and split
//! read/write connection pools. Each mutation writes its state change and
//! its journal entry in one transaction on the single writer connection.

pub mod achievement;
pub mod journal;
pub mod pool;
pub mod profile;
pub mod skill;

use chrono::{DateTime, Utc};
use jobstar_types::error::RepositoryError;

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub(crate) fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

/// The INTEGER key an id would be stored under, or `None` if the id is
/// beyond i64 and so can never have been stored.
pub(crate) fn stored_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

/// Ids are unsigned in the domain and INTEGER (i64) in SQLite.
pub(crate) fn to_sql_id(id: u64) -> Result<i64, RepositoryError> {
    i64::try_from(id).map_err(|_| RepositoryError::Query(format!("id {id} out of range")))
}

pub(crate) fn from_sql_id(id: i64) -> Result<u64, RepositoryError> {
    u64::try_from(id).map_err(|_| RepositoryError::Query(format!("negative id {id} in database")))
}
