//! SQLite-backed local profile registry.
//!
//! Persists minted profiles in the `profiles` table so ownership survives
//! between CLI invocations, and serves as the ownership oracle for the
//! ledger in that setting.

use chrono::Utc;
use jobstar_core::oracle::ProfileOwnershipOracle;
use jobstar_types::error::{OracleError, ProfileRegistryError, RepositoryError};
use jobstar_types::profile::{Address, Profile, ProfileId};
use sqlx::Row;
use tracing::{debug, info};

use super::pool::DatabasePool;
use super::{format_datetime, from_sql_id, query_error, stored_id};

/// Persistent identity registry.
pub struct SqliteProfileRegistry {
    pool: DatabasePool,
}

impl SqliteProfileRegistry {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Mint a new profile owned by `owner`. Ids start at 1.
    pub async fn mint(
        &self,
        handle: &str,
        owner: Address,
    ) -> Result<ProfileId, ProfileRegistryError> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(ProfileRegistryError::EmptyHandle);
        }

        let now = format_datetime(&Utc::now());
        let result = sqlx::query(
            "INSERT INTO profiles (handle, owner, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(handle)
        .bind(owner.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) => {
                let id = ProfileId(from_sql_id(done.last_insert_rowid())?);
                info!(profile_id = %id, handle, owner = %owner, "Profile minted");
                Ok(id)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(ProfileRegistryError::HandleTaken(handle.to_string()))
            }
            Err(e) => Err(query_error(e).into()),
        }
    }

    /// Move `profile_id` from `from` to `to`. Only the current owner may do this.
    pub async fn transfer(
        &self,
        profile_id: ProfileId,
        from: &Address,
        to: Address,
    ) -> Result<(), ProfileRegistryError> {
        let id = stored_id(profile_id.get())
            .ok_or(ProfileRegistryError::UnknownProfile(profile_id))?;
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let current: Option<(String,)> = sqlx::query_as("SELECT owner FROM profiles WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(query_error)?;

        let (current,) = current.ok_or(ProfileRegistryError::UnknownProfile(profile_id))?;
        if current != from.as_str() {
            return Err(ProfileRegistryError::NotOwner(profile_id));
        }

        sqlx::query("UPDATE profiles SET owner = ?, updated_at = ? WHERE id = ?")
            .bind(to.as_str())
            .bind(format_datetime(&Utc::now()))
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        tx.commit().await.map_err(query_error)?;

        info!(profile_id = %profile_id, from = %from, to = %to, "Profile transferred");
        Ok(())
    }

    pub async fn profile(&self, profile_id: ProfileId) -> Result<Option<Profile>, RepositoryError> {
        let Some(id) = stored_id(profile_id.get()) else {
            return Ok(None);
        };

        let row = sqlx::query("SELECT id, handle, owner FROM profiles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: i64 = row.try_get("id").map_err(query_error)?;
        let handle: String = row.try_get("handle").map_err(query_error)?;
        let owner: String = row.try_get("owner").map_err(query_error)?;

        Ok(Some(Profile {
            id: ProfileId(from_sql_id(id)?),
            handle,
            owner: Address::new(owner),
        }))
    }

    /// Number of minted profiles.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(query_error)?;
        from_sql_id(count)
    }
}

impl ProfileOwnershipOracle for SqliteProfileRegistry {
    async fn owner_of(&self, profile_id: ProfileId) -> Result<Option<Address>, OracleError> {
        let Some(id) = stored_id(profile_id.get()) else {
            debug!(profile_id = %profile_id, "Profile id beyond stored range");
            return Ok(None);
        };

        let row: Option<(String,)> = sqlx::query_as("SELECT owner FROM profiles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| OracleError::Unavailable(e.to_string()))?;

        debug!(profile_id = %profile_id, found = row.is_some(), "Profile owner lookup");
        Ok(row.map(|(owner,)| Address::new(owner)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::test_pool;

    #[tokio::test]
    async fn test_mint_and_lookup() {
        let registry = SqliteProfileRegistry::new(test_pool().await);

        let worker = registry.mint("worker", Address::new("0xworker")).await.unwrap();
        let issuer = registry.mint("issuer", Address::new("0xissuer")).await.unwrap();
        assert_eq!(worker, ProfileId(1));
        assert_eq!(issuer, ProfileId(2));

        let profile = registry.profile(worker).await.unwrap().unwrap();
        assert_eq!(profile.handle, "worker");
        assert_eq!(profile.owner, Address::new("0xworker"));
        assert_eq!(registry.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_mint_duplicate_handle() {
        let registry = SqliteProfileRegistry::new(test_pool().await);
        registry.mint("worker", Address::new("0xa")).await.unwrap();

        let err = registry.mint("worker", Address::new("0xb")).await.unwrap_err();
        assert!(matches!(err, ProfileRegistryError::HandleTaken(h) if h == "worker"));

        let err = registry.mint("", Address::new("0xb")).await.unwrap_err();
        assert!(matches!(err, ProfileRegistryError::EmptyHandle));
    }

    #[tokio::test]
    async fn test_transfer_changes_oracle_answer() {
        let registry = SqliteProfileRegistry::new(test_pool().await);
        let id = registry.mint("worker", Address::new("0xalice")).await.unwrap();

        let err = registry
            .transfer(id, &Address::new("0xbob"), Address::new("0xbob"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileRegistryError::NotOwner(_)));

        registry
            .transfer(id, &Address::new("0xalice"), Address::new("0xbob"))
            .await
            .unwrap();
        assert_eq!(
            registry.owner_of(id).await.unwrap(),
            Some(Address::new("0xbob"))
        );
    }

    #[tokio::test]
    async fn test_unknown_profile() {
        let registry = SqliteProfileRegistry::new(test_pool().await);

        assert!(registry.profile(ProfileId(4)).await.unwrap().is_none());
        assert_eq!(registry.owner_of(ProfileId(4)).await.unwrap(), None);

        let err = registry
            .transfer(ProfileId(4), &Address::new("0xa"), Address::new("0xb"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileRegistryError::UnknownProfile(ProfileId(4))));
    }

    #[tokio::test]
    async fn test_profile_beyond_integer_range_is_unknown() {
        let registry = SqliteProfileRegistry::new(test_pool().await);
        let huge = ProfileId(u64::MAX);

        assert!(registry.profile(huge).await.unwrap().is_none());
        assert_eq!(registry.owner_of(huge).await.unwrap(), None);

        let err = registry
            .transfer(huge, &Address::new("0xa"), Address::new("0xb"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileRegistryError::UnknownProfile(id) if id == huge));
    }
}
