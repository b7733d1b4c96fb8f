//! Skill registry service.
//!
//! Profiles advertise an ordered list of skill names. The list is replaced
//! wholesale on every update; there is no merge and no deduplication.

use jobstar_types::error::LedgerError;
use jobstar_types::event::RecordedEvent;
use jobstar_types::profile::{Address, ProfileId};
use tracing::{debug, info};

use crate::event::EventBus;
use crate::guard::AuthorizationGuard;
use crate::oracle::ProfileOwnershipOracle;
use crate::repository::skill::SkillRepository;

/// Per-profile skill lists, writable only by the profile's current owner.
pub struct SkillRegistry<S: SkillRepository, O: ProfileOwnershipOracle> {
    repo: S,
    guard: AuthorizationGuard<O>,
    sequencer: super::Sequencer,
    bus: EventBus,
}

impl<S: SkillRepository, O: ProfileOwnershipOracle> SkillRegistry<S, O> {
    /// Create a new SkillRegistry.
    ///
    /// Pass the same `sequencer` and `bus` to every service of one ledger.
    pub fn new(repo: S, oracle: O, sequencer: super::Sequencer, bus: EventBus) -> Self {
        Self {
            repo,
            guard: AuthorizationGuard::new(oracle),
            sequencer,
            bus,
        }
    }

    /// Skills of `profile_id`, in the order they were set.
    pub async fn get_skills(&self, profile_id: ProfileId) -> Result<Vec<String>, LedgerError> {
        let skills = self.repo.skills(profile_id).await?;
        debug!(profile_id = %profile_id, count = skills.len(), "Loaded skills");
        Ok(skills)
    }

    /// Replace the skills of `profile_id` with `new_skills`.
    ///
    /// Only the current owner of the profile may do this. Returns the
    /// journaled `SkillsUpdated` event, whose `old_skills` is the list that
    /// was replaced.
    pub async fn update_skills(
        &self,
        profile_id: ProfileId,
        new_skills: Vec<String>,
        caller: &Address,
    ) -> Result<RecordedEvent, LedgerError> {
        let _turn = self.sequencer.enter().await;

        self.guard.require_owner(profile_id, caller).await?;

        let recorded = self
            .repo
            .replace_skills(profile_id, caller, &new_skills)
            .await?;

        info!(
            profile_id = %profile_id,
            owner = %caller,
            skills = new_skills.len(),
            sequence = recorded.sequence,
            "Skills updated"
        );
        self.bus.publish(recorded.clone());

        Ok(recorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Sequencer;
    use crate::testing::{FakeOracle, FakeStore};
    use jobstar_types::event::LedgerEvent;

    const WORKER: ProfileId = ProfileId(1);
    const ISSUER: ProfileId = ProfileId(2);

    fn registry() -> SkillRegistry<FakeStore, FakeOracle> {
        let oracle = FakeOracle::new();
        oracle.set_owner(WORKER, "0xworker");
        oracle.set_owner(ISSUER, "0xissuer");
        SkillRegistry::new(FakeStore::new(), oracle, Sequencer::new(), EventBus::new(16))
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn untouched_profiles_have_no_skills() {
        let registry = registry();
        assert!(registry.get_skills(WORKER).await.unwrap().is_empty());
        assert!(registry.get_skills(ISSUER).await.unwrap().is_empty());
        assert!(registry.get_skills(ProfileId(999)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_update_reports_empty_old_skills() {
        let registry = registry();
        let worker = Address::new("0xworker");

        let recorded = registry
            .update_skills(WORKER, skills(&["Javascript", "Solidity"]), &worker)
            .await
            .unwrap();

        assert_eq!(
            registry.get_skills(WORKER).await.unwrap(),
            skills(&["Javascript", "Solidity"])
        );
        assert!(registry.get_skills(ISSUER).await.unwrap().is_empty());
        assert_eq!(
            recorded.event,
            LedgerEvent::SkillsUpdated {
                owner: worker,
                profile_id: WORKER,
                old_skills: vec![],
                new_skills: skills(&["Javascript", "Solidity"]),
            }
        );
    }

    #[tokio::test]
    async fn update_replaces_instead_of_merging() {
        let registry = registry();
        let worker = Address::new("0xworker");

        registry
            .update_skills(WORKER, skills(&["Rust", "Go"]), &worker)
            .await
            .unwrap();
        let recorded = registry
            .update_skills(WORKER, skills(&["Solidity", "Solidity"]), &worker)
            .await
            .unwrap();

        assert_eq!(
            registry.get_skills(WORKER).await.unwrap(),
            skills(&["Solidity", "Solidity"])
        );
        match recorded.event {
            LedgerEvent::SkillsUpdated {
                old_skills,
                new_skills,
                ..
            } => {
                assert_eq!(old_skills, skills(&["Rust", "Go"]));
                assert_eq!(new_skills, skills(&["Solidity", "Solidity"]));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_by_non_owner_is_rejected_without_side_effects() {
        let registry = registry();
        let mut rx = registry.bus.subscribe();

        let err = registry
            .update_skills(ISSUER, skills(&["Javascript"]), &Address::new("0xworker"))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::NotOwnerOfProfile(ISSUER)));
        assert_eq!(err.to_string(), "NotOwnerOfProfile(2)");
        assert!(registry.get_skills(ISSUER).await.unwrap().is_empty());
        assert_eq!(registry.repo.event_count(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn committed_update_is_published() {
        let registry = registry();
        let mut rx = registry.bus.subscribe();

        registry
            .update_skills(WORKER, skills(&["Rust"]), &Address::new("0xworker"))
            .await
            .unwrap();

        let published = rx.recv().await.unwrap();
        assert_eq!(published.sequence, 1);
        assert!(matches!(
            published.event,
            LedgerEvent::SkillsUpdated { profile_id: WORKER, .. }
        ));
    }

    #[tokio::test]
    async fn storage_failure_publishes_nothing() {
        let registry = registry();
        let mut rx = registry.bus.subscribe();
        registry.repo.set_fail_writes(true);

        let err = registry
            .update_skills(WORKER, skills(&["Rust"]), &Address::new("0xworker"))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::Storage(_)));
        assert!(rx.try_recv().is_err());
    }
}
