//! Achievement store trait definition.

use jobstar_types::achievement::{Achievement, AchievementContent, AchievementId};
use jobstar_types::error::RepositoryError;
use jobstar_types::event::RecordedEvent;
use jobstar_types::profile::ProfileId;

/// Append-only achievement records plus the id counter.
pub trait AchievementRepository: Send + Sync {
    /// Allocate the next id, store the record as pending, and journal an
    /// `AchievementProposed` event.
    fn insert(
        &self,
        content: &AchievementContent,
    ) -> impl std::future::Future<Output = Result<RecordedEvent, RepositoryError>> + Send;

    /// Flip `accepted` to true and journal an `AchievementAccepted` event.
    ///
    /// Returns `NotFound` for an unallocated id and `Conflict` if the record
    /// is already accepted; neither case changes anything.
    fn mark_accepted(
        &self,
        id: AchievementId,
    ) -> impl std::future::Future<Output = Result<RecordedEvent, RepositoryError>> + Send;

    /// Get a record by id.
    fn get(
        &self,
        id: AchievementId,
    ) -> impl std::future::Future<Output = Result<Option<Achievement>, RepositoryError>> + Send;

    /// The last allocated id (0 when empty).
    fn last_id(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Records owed to `worker` that are not yet accepted.
    fn count_pending(
        &self,
        worker: ProfileId,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Records not yet accepted, across all workers.
    fn count_all_pending(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Accepted records of `worker` whose skill equals `skill` exactly.
    fn count_accepted(
        &self,
        worker: ProfileId,
        skill: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
