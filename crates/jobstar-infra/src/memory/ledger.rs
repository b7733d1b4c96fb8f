//! In-memory ledger store.
//!
//! Implements `SkillRepository`, `AchievementRepository`, and `EventJournal`
//! over a single lock-protected state, so every mutation and its journal
//! entry become visible together. Counting queries are linear scans.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use jobstar_core::repository::achievement::AchievementRepository;
use jobstar_core::repository::journal::EventJournal;
use jobstar_core::repository::skill::SkillRepository;
use jobstar_types::achievement::{Achievement, AchievementContent, AchievementId};
use jobstar_types::error::RepositoryError;
use jobstar_types::event::{EventKind, LedgerEvent, RecordedEvent};
use jobstar_types::profile::{Address, ProfileId};

#[derive(Debug, Default)]
struct LedgerState {
    skills: HashMap<ProfileId, Vec<String>>,
    /// Index `i` holds achievement id `i + 1`.
    achievements: Vec<Achievement>,
    events: Vec<RecordedEvent>,
}

impl LedgerState {
    fn record(&mut self, event: LedgerEvent) -> RecordedEvent {
        let recorded = RecordedEvent {
            sequence: self.events.len() as u64 + 1,
            recorded_at: Utc::now(),
            event,
        };
        self.events.push(recorded.clone());
        recorded
    }

    fn slot(&self, id: AchievementId) -> Option<usize> {
        let index = id.get().checked_sub(1)? as usize;
        (index < self.achievements.len()).then_some(index)
    }
}

/// In-memory store backing every ledger trait.
///
/// Cloning shares the underlying state, so one store can be handed to both
/// the skill registry and the achievement ledger.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, RepositoryError> {
        self.state
            .read()
            .map_err(|_| RepositoryError::Query("ledger state lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, RepositoryError> {
        self.state
            .write()
            .map_err(|_| RepositoryError::Query("ledger state lock poisoned".to_string()))
    }
}

impl SkillRepository for InMemoryLedgerStore {
    async fn skills(&self, profile_id: ProfileId) -> Result<Vec<String>, RepositoryError> {
        Ok(self.read()?.skills.get(&profile_id).cloned().unwrap_or_default())
    }

    async fn replace_skills(
        &self,
        profile_id: ProfileId,
        owner: &Address,
        new_skills: &[String],
    ) -> Result<RecordedEvent, RepositoryError> {
        let mut state = self.write()?;
        let old_skills = state
            .skills
            .insert(profile_id, new_skills.to_vec())
            .unwrap_or_default();

        Ok(state.record(LedgerEvent::SkillsUpdated {
            owner: owner.clone(),
            profile_id,
            old_skills,
            new_skills: new_skills.to_vec(),
        }))
    }
}

impl AchievementRepository for InMemoryLedgerStore {
    async fn insert(&self, content: &AchievementContent) -> Result<RecordedEvent, RepositoryError> {
        let mut state = self.write()?;
        let id = AchievementId(state.achievements.len() as u64 + 1);
        state.achievements.push(Achievement {
            id,
            content: content.clone(),
            accepted: false,
        });

        Ok(state.record(LedgerEvent::AchievementProposed {
            achievement_id: id,
            issuer_profile_id: content.issuer_profile_id,
            worker_profile_id: content.worker_profile_id,
        }))
    }

    async fn mark_accepted(&self, id: AchievementId) -> Result<RecordedEvent, RepositoryError> {
        let mut state = self.write()?;
        let index = state.slot(id).ok_or(RepositoryError::NotFound)?;

        let record = &mut state.achievements[index];
        if record.accepted {
            return Err(RepositoryError::Conflict(format!(
                "achievement {id} already accepted"
            )));
        }
        record.accepted = true;
        let event = LedgerEvent::AchievementAccepted {
            issuer_profile_id: record.content.issuer_profile_id,
            worker_profile_id: record.content.worker_profile_id,
            achievement_id: id,
        };

        Ok(state.record(event))
    }

    async fn get(&self, id: AchievementId) -> Result<Option<Achievement>, RepositoryError> {
        let state = self.read()?;
        Ok(state.slot(id).map(|index| state.achievements[index].clone()))
    }

    async fn last_id(&self) -> Result<u64, RepositoryError> {
        Ok(self.read()?.achievements.len() as u64)
    }

    async fn count_pending(&self, worker: ProfileId) -> Result<u64, RepositoryError> {
        let state = self.read()?;
        Ok(state
            .achievements
            .iter()
            .filter(|a| a.is_pending_for(worker))
            .count() as u64)
    }

    async fn count_all_pending(&self) -> Result<u64, RepositoryError> {
        let state = self.read()?;
        Ok(state.achievements.iter().filter(|a| !a.accepted).count() as u64)
    }

    async fn count_accepted(&self, worker: ProfileId, skill: &str) -> Result<u64, RepositoryError> {
        let state = self.read()?;
        Ok(state
            .achievements
            .iter()
            .filter(|a| a.counts_towards(worker, skill))
            .count() as u64)
    }
}

impl EventJournal for InMemoryLedgerStore {
    async fn list_events(&self, kind: Option<EventKind>) -> Result<Vec<RecordedEvent>, RepositoryError> {
        let state = self.read()?;
        Ok(state
            .events
            .iter()
            .filter(|e| kind.is_none_or(|k| e.event.kind() == k))
            .cloned()
            .collect())
    }
}
