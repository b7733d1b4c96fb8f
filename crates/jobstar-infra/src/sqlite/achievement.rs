//! SQLite achievement store implementation.
//!
//! Implements `AchievementRepository` and `EventJournal` from `jobstar-core`.
//! Ids come from the `next_achievement_id` counter row, bumped in the same
//! transaction as the insert, so they stay dense even across restarts.

use jobstar_core::repository::achievement::AchievementRepository;
use jobstar_core::repository::journal::EventJournal;
use jobstar_types::achievement::{Achievement, AchievementContent, AchievementId};
use jobstar_types::error::RepositoryError;
use jobstar_types::event::{EventKind, LedgerEvent, RecordedEvent};
use jobstar_types::profile::ProfileId;
use sqlx::Row;

use super::journal::{append_event, list_events};
use super::pool::DatabasePool;
use super::{format_datetime, from_sql_id, parse_datetime, query_error, stored_id, to_sql_id};

const NEXT_ID_COUNTER: &str = "next_achievement_id";

/// SQLite-backed implementation of `AchievementRepository` and `EventJournal`.
pub struct SqliteAchievementRepository {
    pool: DatabasePool,
}

impl SqliteAchievementRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct AchievementRow {
    id: i64,
    issuer_profile_id: i64,
    worker_profile_id: i64,
    title: String,
    description: String,
    date_of_delivery: String,
    image_uri: String,
    skill: String,
    accepted: bool,
}

impl AchievementRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            issuer_profile_id: row.try_get("issuer_profile_id")?,
            worker_profile_id: row.try_get("worker_profile_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            date_of_delivery: row.try_get("date_of_delivery")?,
            image_uri: row.try_get("image_uri")?,
            skill: row.try_get("skill")?,
            accepted: row.try_get("accepted")?,
        })
    }

    fn into_achievement(self) -> Result<Achievement, RepositoryError> {
        Ok(Achievement {
            id: AchievementId(from_sql_id(self.id)?),
            content: AchievementContent {
                issuer_profile_id: ProfileId(from_sql_id(self.issuer_profile_id)?),
                worker_profile_id: ProfileId(from_sql_id(self.worker_profile_id)?),
                title: self.title,
                description: self.description,
                date_of_delivery: parse_datetime(&self.date_of_delivery)?,
                image_uri: self.image_uri,
                skill: self.skill,
            },
            accepted: self.accepted,
        })
    }
}

impl AchievementRepository for SqliteAchievementRepository {
    async fn insert(&self, content: &AchievementContent) -> Result<RecordedEvent, RepositoryError> {
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let (next,): (i64,) = sqlx::query_as("SELECT value FROM ledger_counters WHERE name = ?")
            .bind(NEXT_ID_COUNTER)
            .fetch_one(&mut *tx)
            .await
            .map_err(query_error)?;

        sqlx::query(
            r#"
            INSERT INTO achievements
                (id, issuer_profile_id, worker_profile_id, title, description,
                 date_of_delivery, image_uri, skill, accepted)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(next)
        .bind(to_sql_id(content.issuer_profile_id.get())?)
        .bind(to_sql_id(content.worker_profile_id.get())?)
        .bind(&content.title)
        .bind(&content.description)
        .bind(format_datetime(&content.date_of_delivery))
        .bind(&content.image_uri)
        .bind(&content.skill)
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE") => {
                RepositoryError::Conflict(format!("achievement {next} already exists"))
            }
            e => query_error(e),
        })?;

        sqlx::query("UPDATE ledger_counters SET value = value + 1 WHERE name = ?")
            .bind(NEXT_ID_COUNTER)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        let recorded = append_event(
            &mut tx,
            LedgerEvent::AchievementProposed {
                achievement_id: AchievementId(from_sql_id(next)?),
                issuer_profile_id: content.issuer_profile_id,
                worker_profile_id: content.worker_profile_id,
            },
        )
        .await?;

        tx.commit().await.map_err(query_error)?;
        Ok(recorded)
    }

    async fn mark_accepted(&self, id: AchievementId) -> Result<RecordedEvent, RepositoryError> {
        let sql_id = stored_id(id.get()).ok_or(RepositoryError::NotFound)?;
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let row: Option<(i64, i64, bool)> = sqlx::query_as(
            "SELECT issuer_profile_id, worker_profile_id, accepted FROM achievements WHERE id = ?",
        )
        .bind(sql_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(query_error)?;

        // Dropping `tx` without commit rolls back; nothing was written yet anyway.
        let (issuer, worker, accepted) = row.ok_or(RepositoryError::NotFound)?;
        if accepted {
            return Err(RepositoryError::Conflict(format!(
                "achievement {id} already accepted"
            )));
        }

        sqlx::query("UPDATE achievements SET accepted = 1 WHERE id = ? AND accepted = 0")
            .bind(sql_id)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        let recorded = append_event(
            &mut tx,
            LedgerEvent::AchievementAccepted {
                issuer_profile_id: ProfileId(from_sql_id(issuer)?),
                worker_profile_id: ProfileId(from_sql_id(worker)?),
                achievement_id: id,
            },
        )
        .await?;

        tx.commit().await.map_err(query_error)?;
        Ok(recorded)
    }

    async fn get(&self, id: AchievementId) -> Result<Option<Achievement>, RepositoryError> {
        let Some(sql_id) = stored_id(id.get()) else {
            return Ok(None);
        };

        let row = sqlx::query(
            r#"
            SELECT id, issuer_profile_id, worker_profile_id, title, description,
                   date_of_delivery, image_uri, skill, accepted
            FROM achievements WHERE id = ?
            "#,
        )
        .bind(sql_id)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        match row {
            Some(r) => {
                let row = AchievementRow::from_row(&r).map_err(query_error)?;
                Ok(Some(row.into_achievement()?))
            }
            None => Ok(None),
        }
    }

    async fn last_id(&self) -> Result<u64, RepositoryError> {
        let (next,): (i64,) = sqlx::query_as("SELECT value FROM ledger_counters WHERE name = ?")
            .bind(NEXT_ID_COUNTER)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_error)?;

        from_sql_id(next - 1)
    }

    async fn count_pending(&self, worker: ProfileId) -> Result<u64, RepositoryError> {
        let Some(worker_id) = stored_id(worker.get()) else {
            return Ok(0);
        };

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM achievements WHERE worker_profile_id = ? AND accepted = 0",
        )
        .bind(worker_id)
        .fetch_one(&self.pool.reader)
        .await
        .map_err(query_error)?;

        from_sql_id(count)
    }

    async fn count_all_pending(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM achievements WHERE accepted = 0")
                .fetch_one(&self.pool.reader)
                .await
                .map_err(query_error)?;

        from_sql_id(count)
    }

    async fn count_accepted(&self, worker: ProfileId, skill: &str) -> Result<u64, RepositoryError> {
        let Some(worker_id) = stored_id(worker.get()) else {
            return Ok(0);
        };

        // `=` on TEXT uses the BINARY collation: exact, case-sensitive.
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM achievements WHERE worker_profile_id = ? AND skill = ? AND accepted = 1",
        )
        .bind(worker_id)
        .bind(skill)
        .fetch_one(&self.pool.reader)
        .await
        .map_err(query_error)?;

        from_sql_id(count)
    }
}

impl EventJournal for SqliteAchievementRepository {
    async fn list_events(&self, kind: Option<EventKind>) -> Result<Vec<RecordedEvent>, RepositoryError> {
        list_events(&self.pool, kind).await
    }
}
