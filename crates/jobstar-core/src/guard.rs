//! Ownership-delegated authorization.
//!
//! Every mutating ledger operation names a profile it acts for. The guard
//! resolves that profile's current owner through the oracle and rejects the
//! call unless the caller is that owner.

use jobstar_types::error::LedgerError;
use jobstar_types::profile::{Address, ProfileId};
use tracing::{debug, warn};

use crate::oracle::ProfileOwnershipOracle;

/// Gate in front of every ledger mutation.
///
/// Holds no state besides the oracle handle, so ownership changes in the
/// identity registry take effect on the very next call.
pub struct AuthorizationGuard<O: ProfileOwnershipOracle> {
    oracle: O,
}

impl<O: ProfileOwnershipOracle> AuthorizationGuard<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Access the oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Succeed iff `caller` currently owns `profile_id`.
    ///
    /// A profile the oracle does not know has no owner, so the check fails
    /// with `NotOwnerOfProfile` rather than a lookup error.
    pub async fn require_owner(
        &self,
        profile_id: ProfileId,
        caller: &Address,
    ) -> Result<(), LedgerError> {
        let owner = self.oracle.owner_of(profile_id).await?;
        debug!(profile_id = %profile_id, owner = ?owner, "Resolved profile owner");

        match owner {
            Some(owner) if &owner == caller => Ok(()),
            _ => {
                warn!(profile_id = %profile_id, caller = %caller, "Caller does not own profile");
                Err(LedgerError::NotOwnerOfProfile(profile_id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeOracle;

    #[tokio::test]
    async fn owner_passes() {
        let oracle = FakeOracle::new();
        oracle.set_owner(ProfileId(1), "0xworker");
        let guard = AuthorizationGuard::new(oracle);

        guard
            .require_owner(ProfileId(1), &Address::new("0xworker"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_owner_is_rejected_with_profile_id() {
        let oracle = FakeOracle::new();
        oracle.set_owner(ProfileId(2), "0xissuer");
        let guard = AuthorizationGuard::new(oracle);

        let err = guard
            .require_owner(ProfileId(2), &Address::new("0xworker"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotOwnerOfProfile(ProfileId(2))));
    }

    #[tokio::test]
    async fn unknown_profile_is_rejected() {
        let guard = AuthorizationGuard::new(FakeOracle::new());

        let err = guard
            .require_owner(ProfileId(42), &Address::new("0xanyone"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotOwnerOfProfile(ProfileId(42))));
    }

    #[tokio::test]
    async fn ownership_is_resolved_on_every_call() {
        let oracle = FakeOracle::new();
        oracle.set_owner(ProfileId(1), "0xalice");
        let guard = AuthorizationGuard::new(oracle);
        let alice = Address::new("0xalice");
        let bob = Address::new("0xbob");

        guard.require_owner(ProfileId(1), &alice).await.unwrap();

        guard.oracle().set_owner(ProfileId(1), "0xbob");

        assert!(guard.require_owner(ProfileId(1), &alice).await.is_err());
        guard.require_owner(ProfileId(1), &bob).await.unwrap();
        assert_eq!(guard.oracle().lookups(), 3);
    }

    #[tokio::test]
    async fn oracle_failure_is_not_a_rejection() {
        let oracle = FakeOracle::new();
        oracle.set_unavailable(true);
        let guard = AuthorizationGuard::new(oracle);

        let err = guard
            .require_owner(ProfileId(1), &Address::new("0xworker"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Oracle(_)));
        assert!(!err.is_rejection());
    }
}
