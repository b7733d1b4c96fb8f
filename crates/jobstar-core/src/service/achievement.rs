//! Achievement ledger service.
//!
//! Each achievement moves through exactly two states:
//!
//! ```text
//! Proposed --accept_achievement--> Accepted
//! ```
//!
//! Proposing requires owning the issuer profile. Accepting requires owning
//! the worker profile. There is no rejection, cancellation, or deletion.

use jobstar_types::achievement::{Achievement, AchievementContent, AchievementId};
use jobstar_types::error::{LedgerError, RepositoryError};
use jobstar_types::event::{EventKind, LedgerEvent, RecordedEvent};
use jobstar_types::profile::{Address, ProfileId};
use tracing::{debug, info, warn};

use crate::event::EventBus;
use crate::guard::AuthorizationGuard;
use crate::oracle::ProfileOwnershipOracle;
use crate::repository::achievement::AchievementRepository;
use crate::repository::journal::EventJournal;

/// Store of achievement records and their Proposed/Accepted lifecycle.
///
/// Generic over the store and the ownership oracle so the same rules run
/// against the in-memory store in tests and SQLite in the CLI.
pub struct AchievementLedger<A, O>
where
    A: AchievementRepository + EventJournal,
    O: ProfileOwnershipOracle,
{
    repo: A,
    guard: AuthorizationGuard<O>,
    sequencer: super::Sequencer,
    bus: EventBus,
}

impl<A, O> AchievementLedger<A, O>
where
    A: AchievementRepository + EventJournal,
    O: ProfileOwnershipOracle,
{
    /// Create a new AchievementLedger.
    ///
    /// Pass the same `sequencer` and `bus` to every service of one ledger.
    pub fn new(repo: A, oracle: O, sequencer: super::Sequencer, bus: EventBus) -> Self {
        Self {
            repo,
            guard: AuthorizationGuard::new(oracle),
            sequencer,
            bus,
        }
    }

    /// Propose an achievement on behalf of `content.issuer_profile_id`.
    ///
    /// The worker profile is not checked here; anyone may be named, and the
    /// worker's owner decides later whether to accept.
    pub async fn propose_achievement(
        &self,
        content: AchievementContent,
        caller: &Address,
    ) -> Result<AchievementId, LedgerError> {
        let _turn = self.sequencer.enter().await;

        self.guard
            .require_owner(content.issuer_profile_id, caller)
            .await?;

        let recorded = self.repo.insert(&content).await?;
        let achievement_id = match &recorded.event {
            LedgerEvent::AchievementProposed { achievement_id, .. } => *achievement_id,
            other => {
                return Err(LedgerError::Storage(RepositoryError::Query(format!(
                    "store journaled {} for a proposal",
                    other.kind()
                ))));
            }
        };

        info!(
            achievement_id = %achievement_id,
            issuer = %content.issuer_profile_id,
            worker = %content.worker_profile_id,
            skill = %content.skill,
            "Achievement proposed"
        );
        self.bus.publish(recorded);

        Ok(achievement_id)
    }

    /// Accept a pending achievement as the owner of its worker profile.
    ///
    /// Checks run in a fixed order: existence, then ownership of the worker
    /// profile, then whether it was already accepted.
    pub async fn accept_achievement(
        &self,
        achievement_id: AchievementId,
        caller: &Address,
    ) -> Result<(), LedgerError> {
        let _turn = self.sequencer.enter().await;

        let record = self
            .repo
            .get(achievement_id)
            .await?
            .ok_or(LedgerError::InexistentAchievement(achievement_id))?;

        self.guard
            .require_owner(record.content.worker_profile_id, caller)
            .await?;

        if record.accepted {
            warn!(achievement_id = %achievement_id, "Achievement already accepted");
            return Err(LedgerError::AchievementAlreadyAccepted(achievement_id));
        }

        let recorded = self
            .repo
            .mark_accepted(achievement_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => LedgerError::InexistentAchievement(achievement_id),
                RepositoryError::Conflict(_) => {
                    LedgerError::AchievementAlreadyAccepted(achievement_id)
                }
                other => LedgerError::Storage(other),
            })?;

        info!(
            achievement_id = %achievement_id,
            issuer = %record.content.issuer_profile_id,
            worker = %record.content.worker_profile_id,
            "Achievement accepted"
        );
        self.bus.publish(recorded);

        Ok(())
    }

    /// Get an achievement by id.
    ///
    /// An id that was never allocated (including 0) fails with
    /// `InexistentAchievement` instead of returning a zeroed record.
    pub async fn get_achievement_by_id(
        &self,
        achievement_id: AchievementId,
    ) -> Result<Achievement, LedgerError> {
        self.repo
            .get(achievement_id)
            .await?
            .ok_or(LedgerError::InexistentAchievement(achievement_id))
    }

    /// Number of achievements owed to `worker` that are still pending.
    pub async fn get_pending_achievements_count(
        &self,
        worker: ProfileId,
    ) -> Result<u64, LedgerError> {
        let count = self.repo.count_pending(worker).await?;
        debug!(worker = %worker, count, "Counted pending achievements");
        Ok(count)
    }

    /// Number of accepted achievements of `worker` for exactly `skill`.
    pub async fn get_achievements_count(
        &self,
        worker: ProfileId,
        skill: &str,
    ) -> Result<u64, LedgerError> {
        let count = self.repo.count_accepted(worker, skill).await?;
        debug!(worker = %worker, skill, count, "Counted accepted achievements");
        Ok(count)
    }

    /// Number of achievements still pending, across all workers.
    pub async fn get_total_pending_count(&self) -> Result<u64, LedgerError> {
        let count = self.repo.count_all_pending().await?;
        debug!(count, "Counted pending achievements across workers");
        Ok(count)
    }

    /// Total number of achievements ever proposed.
    pub async fn total_achievements(&self) -> Result<u64, LedgerError> {
        Ok(self.repo.last_id().await?)
    }

    /// Journaled events in commit order, optionally of one kind.
    pub async fn events(&self, kind: Option<EventKind>) -> Result<Vec<RecordedEvent>, LedgerError> {
        Ok(self.repo.list_events(kind).await?)
    }

    /// Every accepted achievement, resolved from the `AchievementAccepted`
    /// journal entries in the order they were accepted.
    pub async fn accepted_achievements(&self) -> Result<Vec<Achievement>, LedgerError> {
        let events = self
            .repo
            .list_events(Some(EventKind::AchievementAccepted))
            .await?;

        let mut achievements = Vec::with_capacity(events.len());
        for recorded in events {
            if let LedgerEvent::AchievementAccepted { achievement_id, .. } = recorded.event {
                achievements.push(self.get_achievement_by_id(achievement_id).await?);
            }
        }
        Ok(achievements)
    }
}
