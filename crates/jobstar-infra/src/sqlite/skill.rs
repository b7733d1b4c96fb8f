//! SQLite skill store implementation.
//!
//! Each profile's list is stored as one JSON array in `profile_skills`, which
//! keeps caller-controlled order and duplicates intact.

use chrono::Utc;
use jobstar_core::repository::skill::SkillRepository;
use jobstar_types::error::RepositoryError;
use jobstar_types::event::{LedgerEvent, RecordedEvent};
use jobstar_types::profile::{Address, ProfileId};
use sqlx::SqliteConnection;

use super::journal::append_event;
use super::pool::DatabasePool;
use super::{format_datetime, query_error, stored_id, to_sql_id};

/// SQLite-backed implementation of `SkillRepository`.
pub struct SqliteSkillRepository {
    pool: DatabasePool,
}

impl SqliteSkillRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn decode_skills(json: &str) -> Result<Vec<String>, RepositoryError> {
    serde_json::from_str(json)
        .map_err(|e| RepositoryError::Query(format!("invalid skills JSON: {e}")))
}

async fn current_skills(
    conn: &mut SqliteConnection,
    profile_id: i64,
) -> Result<Vec<String>, RepositoryError> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT skills FROM profile_skills WHERE profile_id = ?")
            .bind(profile_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(query_error)?;

    match row {
        Some((json,)) => decode_skills(&json),
        None => Ok(Vec::new()),
    }
}

impl SkillRepository for SqliteSkillRepository {
    async fn skills(&self, profile_id: ProfileId) -> Result<Vec<String>, RepositoryError> {
        let Some(id) = stored_id(profile_id.get()) else {
            return Ok(Vec::new());
        };

        let row: Option<(String,)> =
            sqlx::query_as("SELECT skills FROM profile_skills WHERE profile_id = ?")
                .bind(id)
                .fetch_optional(&self.pool.reader)
                .await
                .map_err(query_error)?;

        match row {
            Some((json,)) => decode_skills(&json),
            None => Ok(Vec::new()),
        }
    }

    async fn replace_skills(
        &self,
        profile_id: ProfileId,
        owner: &Address,
        new_skills: &[String],
    ) -> Result<RecordedEvent, RepositoryError> {
        let id = to_sql_id(profile_id.get())?;
        let encoded = serde_json::to_string(new_skills)
            .map_err(|e| RepositoryError::Query(format!("failed to encode skills: {e}")))?;

        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let old_skills = current_skills(&mut tx, id).await?;

        sqlx::query(
            r#"
            INSERT INTO profile_skills (profile_id, skills, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (profile_id) DO UPDATE SET
                skills = excluded.skills,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(id)
        .bind(&encoded)
        .bind(format_datetime(&Utc::now()))
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

        let recorded = append_event(
            &mut tx,
            LedgerEvent::SkillsUpdated {
                owner: owner.clone(),
                profile_id,
                old_skills,
                new_skills: new_skills.to_vec(),
            },
        )
        .await?;

        tx.commit().await.map_err(query_error)?;
        Ok(recorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::journal::list_events;
    use crate::sqlite::pool::test_pool;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_untouched_profile_is_empty() {
        let repo = SqliteSkillRepository::new(test_pool().await);
        assert!(repo.skills(ProfileId(1)).await.unwrap().is_empty());
        assert!(repo.skills(ProfileId(u64::MAX)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_keeps_order_and_duplicates() {
        let pool = test_pool().await;
        let repo = SqliteSkillRepository::new(pool.clone());
        let owner = Address::new("0xworker");

        let first = repo
            .replace_skills(ProfileId(1), &owner, &skills(&["Solidity", "Rust", "Solidity"]))
            .await
            .unwrap();
        assert_eq!(first.sequence, 1);

        let second = repo
            .replace_skills(ProfileId(1), &owner, &skills(&["Go"]))
            .await
            .unwrap();

        assert_eq!(repo.skills(ProfileId(1)).await.unwrap(), skills(&["Go"]));
        assert_eq!(
            second.event,
            LedgerEvent::SkillsUpdated {
                owner: owner.clone(),
                profile_id: ProfileId(1),
                old_skills: skills(&["Solidity", "Rust", "Solidity"]),
                new_skills: skills(&["Go"]),
            }
        );
        assert_eq!(list_events(&pool, None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_profiles_are_independent() {
        let repo = SqliteSkillRepository::new(test_pool().await);
        let owner = Address::new("0xworker");

        repo.replace_skills(ProfileId(1), &owner, &skills(&["Rust"]))
            .await
            .unwrap();

        assert!(repo.skills(ProfileId(2)).await.unwrap().is_empty());
    }
}
