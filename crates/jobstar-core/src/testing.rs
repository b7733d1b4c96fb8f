//! Hand-written fakes shared by the unit tests in this crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use jobstar_types::achievement::{Achievement, AchievementContent, AchievementId};
use jobstar_types::error::{OracleError, RepositoryError};
use jobstar_types::event::{EventKind, LedgerEvent, RecordedEvent};
use jobstar_types::profile::{Address, ProfileId};

use crate::oracle::ProfileOwnershipOracle;
use crate::repository::achievement::AchievementRepository;
use crate::repository::journal::EventJournal;
use crate::repository::skill::SkillRepository;

// --- Oracle ---

#[derive(Default)]
pub struct FakeOracle {
    owners: Mutex<HashMap<ProfileId, Address>>,
    unavailable: AtomicBool,
    lookups: AtomicUsize,
}

impl FakeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_owner(&self, profile_id: ProfileId, owner: &str) {
        self.owners
            .lock()
            .unwrap()
            .insert(profile_id, Address::new(owner));
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ProfileOwnershipOracle for FakeOracle {
    async fn owner_of(&self, profile_id: ProfileId) -> Result<Option<Address>, OracleError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(OracleError::Unavailable("fake oracle offline".to_string()));
        }
        Ok(self.owners.lock().unwrap().get(&profile_id).cloned())
    }
}

// --- Store ---

#[derive(Default)]
struct FakeState {
    skills: HashMap<ProfileId, Vec<String>>,
    achievements: Vec<Achievement>,
    events: Vec<RecordedEvent>,
}

impl FakeState {
    fn record(&mut self, event: LedgerEvent) -> RecordedEvent {
        let recorded = RecordedEvent {
            sequence: self.events.len() as u64 + 1,
            recorded_at: Utc::now(),
            event,
        };
        self.events.push(recorded.clone());
        recorded
    }
}

#[derive(Default)]
pub struct FakeStore {
    state: Mutex<FakeState>,
    fail_writes: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn event_count(&self) -> usize {
        self.state.lock().unwrap().events.len()
    }

    fn check_writable(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("fake store is read-only".to_string()));
        }
        Ok(())
    }
}

impl SkillRepository for FakeStore {
    async fn skills(&self, profile_id: ProfileId) -> Result<Vec<String>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.skills.get(&profile_id).cloned().unwrap_or_default())
    }

    async fn replace_skills(
        &self,
        profile_id: ProfileId,
        owner: &Address,
        new_skills: &[String],
    ) -> Result<RecordedEvent, RepositoryError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
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

impl AchievementRepository for FakeStore {
    async fn insert(&self, content: &AchievementContent) -> Result<RecordedEvent, RepositoryError> {
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
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
        self.check_writable()?;
        let mut state = self.state.lock().unwrap();
        let record = state
            .achievements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if record.accepted {
            return Err(RepositoryError::Conflict(format!("achievement {id} already accepted")));
        }
        record.accepted = true;
        let (issuer, worker) = (
            record.content.issuer_profile_id,
            record.content.worker_profile_id,
        );
        Ok(state.record(LedgerEvent::AchievementAccepted {
            issuer_profile_id: issuer,
            worker_profile_id: worker,
            achievement_id: id,
        }))
    }

    async fn get(&self, id: AchievementId) -> Result<Option<Achievement>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.achievements.iter().find(|a| a.id == id).cloned())
    }

    async fn last_id(&self) -> Result<u64, RepositoryError> {
        Ok(self.state.lock().unwrap().achievements.len() as u64)
    }

    async fn count_pending(&self, worker: ProfileId) -> Result<u64, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .achievements
            .iter()
            .filter(|a| a.is_pending_for(worker))
            .count() as u64)
    }

    async fn count_all_pending(&self) -> Result<u64, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.achievements.iter().filter(|a| !a.accepted).count() as u64)
    }

    async fn count_accepted(&self, worker: ProfileId, skill: &str) -> Result<u64, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .achievements
            .iter()
            .filter(|a| a.counts_towards(worker, skill))
            .count() as u64)
    }
}

impl EventJournal for FakeStore {
    async fn list_events(&self, kind: Option<EventKind>) -> Result<Vec<RecordedEvent>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .events
            .iter()
            .filter(|e| kind.is_none_or(|k| e.event.kind() == k))
            .cloned()
            .collect())
    }
}
