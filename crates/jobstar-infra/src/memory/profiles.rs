//! In-memory profile registry.
//!
//! A stand-in for the external identity registry: mints profiles with
//! sequential ids, transfers them between owners, and answers ownership
//! queries for the authorization guard.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jobstar_core::oracle::ProfileOwnershipOracle;
use jobstar_types::error::{OracleError, ProfileRegistryError};
use jobstar_types::profile::{Address, Profile, ProfileId};
use tracing::info;

/// Concurrent in-memory identity registry.
#[derive(Debug, Default)]
pub struct InMemoryProfileRegistry {
    profiles: DashMap<ProfileId, Profile>,
    handles: DashMap<String, ProfileId>,
    last_id: AtomicU64,
}

impl InMemoryProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new profile owned by `owner`. Ids start at 1.
    pub fn mint(&self, handle: &str, owner: Address) -> Result<ProfileId, ProfileRegistryError> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(ProfileRegistryError::EmptyHandle);
        }

        match self.handles.entry(handle.to_string()) {
            Entry::Occupied(_) => Err(ProfileRegistryError::HandleTaken(handle.to_string())),
            Entry::Vacant(slot) => {
                let id = ProfileId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
                self.profiles.insert(
                    id,
                    Profile {
                        id,
                        handle: handle.to_string(),
                        owner: owner.clone(),
                    },
                );
                slot.insert(id);
                info!(profile_id = %id, handle, owner = %owner, "Profile minted");
                Ok(id)
            }
        }
    }

    /// Move `profile_id` from `from` to `to`. Only the current owner may do this.
    pub fn transfer(
        &self,
        profile_id: ProfileId,
        from: &Address,
        to: Address,
    ) -> Result<(), ProfileRegistryError> {
        let mut profile = self
            .profiles
            .get_mut(&profile_id)
            .ok_or(ProfileRegistryError::UnknownProfile(profile_id))?;

        if &profile.owner != from {
            return Err(ProfileRegistryError::NotOwner(profile_id));
        }

        info!(profile_id = %profile_id, from = %from, to = %to, "Profile transferred");
        profile.owner = to;
        Ok(())
    }

    pub fn profile(&self, profile_id: ProfileId) -> Option<Profile> {
        self.profiles.get(&profile_id).map(|p| p.value().clone())
    }
}

impl ProfileOwnershipOracle for InMemoryProfileRegistry {
    async fn owner_of(&self, profile_id: ProfileId) -> Result<Option<Address>, OracleError> {
        Ok(self.profiles.get(&profile_id).map(|p| p.owner.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_assigns_sequential_ids() {
        let registry = InMemoryProfileRegistry::new();
        let worker = registry.mint("worker", Address::new("0xworker")).unwrap();
        let issuer = registry.mint("issuer", Address::new("0xissuer")).unwrap();
        assert_eq!(worker, ProfileId(1));
        assert_eq!(issuer, ProfileId(2));
    }

    #[test]
    fn test_mint_rejects_duplicate_and_empty_handles() {
        let registry = InMemoryProfileRegistry::new();
        registry.mint("worker", Address::new("0xa")).unwrap();

        assert!(matches!(
            registry.mint("worker", Address::new("0xb")),
            Err(ProfileRegistryError::HandleTaken(_))
        ));
        assert!(matches!(
            registry.mint("  ", Address::new("0xb")),
            Err(ProfileRegistryError::EmptyHandle)
        ));
        assert_eq!(registry.mint("other", Address::new("0xb")).unwrap(), ProfileId(2));
    }

    #[test]
    fn test_transfer_requires_current_owner() {
        let registry = InMemoryProfileRegistry::new();
        let id = registry.mint("worker", Address::new("0xalice")).unwrap();

        let err = registry
            .transfer(id, &Address::new("0xmallory"), Address::new("0xmallory"))
            .unwrap_err();
        assert!(matches!(err, ProfileRegistryError::NotOwner(_)));

        registry
            .transfer(id, &Address::new("0xalice"), Address::new("0xbob"))
            .unwrap();
        assert_eq!(registry.profile(id).unwrap().owner, Address::new("0xbob"));
    }

    #[test]
    fn test_transfer_unknown_profile() {
        let registry = InMemoryProfileRegistry::new();
        let err = registry
            .transfer(ProfileId(3), &Address::new("0xa"), Address::new("0xb"))
            .unwrap_err();
        assert!(matches!(err, ProfileRegistryError::UnknownProfile(ProfileId(3))));
    }

    #[tokio::test]
    async fn test_owner_of() {
        let registry = InMemoryProfileRegistry::new();
        let id = registry.mint("worker", Address::new("0xworker")).unwrap();

        assert_eq!(
            registry.owner_of(id).await.unwrap(),
            Some(Address::new("0xworker"))
        );
        assert_eq!(registry.owner_of(ProfileId(9)).await.unwrap(), None);
    }
}
