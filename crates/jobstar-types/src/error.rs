use thiserror::Error;

use crate::achievement::AchievementId;
use crate::profile::ProfileId;

/// Errors returned by ledger operations.
///
/// The first three variants are the domain rejections; each carries the id
/// that caused it and renders in the `Name(id)` form that off-chain callers
/// match on. A rejected operation never leaves partial state behind.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("NotOwnerOfProfile({0})")]
    NotOwnerOfProfile(ProfileId),

    #[error("InexistentAchievement({0})")]
    InexistentAchievement(AchievementId),

    #[error("AchievementAlreadyAccepted({0})")]
    AchievementAlreadyAccepted(AchievementId),

    #[error("ownership oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl LedgerError {
    /// True for the rejections a caller can fix by changing its request.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::NotOwnerOfProfile(_)
                | LedgerError::InexistentAchievement(_)
                | LedgerError::AchievementAlreadyAccepted(_)
        )
    }
}

/// Errors from the profile ownership oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("identity registry unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the local profile registry (mint/transfer).
#[derive(Debug, Error)]
pub enum ProfileRegistryError {
    #[error("profile handle cannot be empty")]
    EmptyHandle,

    #[error("handle '{0}' already exists")]
    HandleTaken(String),

    #[error("profile {0} does not exist")]
    UnknownProfile(ProfileId),

    #[error("NotOwnerOfProfile({0})")]
    NotOwner(ProfileId),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors from repository operations (used by trait definitions in jobstar-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
