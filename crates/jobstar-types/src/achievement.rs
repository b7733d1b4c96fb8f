//! Achievement records and their lifecycle.
//!
//! An achievement is proposed by the owner of an issuer profile on behalf of a
//! worker profile, then accepted (once) by the worker's owner. Records are
//! never deleted and never modified after acceptance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::profile::ProfileId;

/// Identifier of an achievement, allocated densely starting at 1.
///
/// `0` is never allocated and stands for "does not exist".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementId(pub u64);

impl AchievementId {
    /// The first id handed out by an empty ledger.
    pub const FIRST: AchievementId = AchievementId(1);

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AchievementId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("invalid achievement id '{s}': {e}"))
    }
}

/// What the issuer claims the worker delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementContent {
    pub issuer_profile_id: ProfileId,
    pub worker_profile_id: ProfileId,
    pub title: String,
    pub description: String,
    pub date_of_delivery: DateTime<Utc>,
    /// May be empty.
    pub image_uri: String,
    /// Free-text skill name, matched by exact string equality.
    pub skill: String,
}

/// A stored achievement: its content plus the acceptance flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub content: AchievementContent,
    pub accepted: bool,
}

impl Achievement {
    /// Pending and owed to `worker`.
    pub fn is_pending_for(&self, worker: ProfileId) -> bool {
        self.content.worker_profile_id == worker && !self.accepted
    }

    /// Accepted by `worker` for exactly `skill`.
    pub fn counts_towards(&self, worker: ProfileId, skill: &str) -> bool {
        self.accepted && self.content.worker_profile_id == worker && self.content.skill == skill
    }
}
