//! Profile ownership oracle trait.
//!
//! The identity registry that mints profiles lives outside the ledger. The
//! ledger only ever asks it one question: who owns this profile right now?

use std::future::Future;
use std::sync::Arc;

use jobstar_types::error::OracleError;
use jobstar_types::profile::{Address, ProfileId};

/// Read-only view of an external identity registry.
///
/// Implementations must answer from current state on every call; the
/// authorization guard never caches an answer. Returns `Ok(None)` for a
/// profile the registry does not know.
pub trait ProfileOwnershipOracle: Send + Sync {
    fn owner_of(
        &self,
        profile_id: ProfileId,
    ) -> impl Future<Output = Result<Option<Address>, OracleError>> + Send;
}

impl<T: ProfileOwnershipOracle> ProfileOwnershipOracle for Arc<T> {
    fn owner_of(
        &self,
        profile_id: ProfileId,
    ) -> impl Future<Output = Result<Option<Address>, OracleError>> + Send {
        (**self).owner_of(profile_id)
    }
}
