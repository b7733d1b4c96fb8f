//! Events emitted by the ledger.
//!
//! `LedgerEvent` is produced once per committed mutation and never for a
//! rejected one. Stores persist it as a `RecordedEvent` in the same
//! transaction as the state change; the event bus fans it out to live
//! subscribers afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::achievement::AchievementId;
use crate::profile::{Address, ProfileId};

/// A domain event produced by a successful ledger mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A profile's skill list was replaced.
    SkillsUpdated {
        owner: Address,
        profile_id: ProfileId,
        old_skills: Vec<String>,
        new_skills: Vec<String>,
    },

    /// A new achievement was proposed by an issuer.
    AchievementProposed {
        achievement_id: AchievementId,
        issuer_profile_id: ProfileId,
        worker_profile_id: ProfileId,
    },

    /// A worker accepted a pending achievement.
    AchievementAccepted {
        issuer_profile_id: ProfileId,
        worker_profile_id: ProfileId,
        achievement_id: AchievementId,
    },
}

impl LedgerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LedgerEvent::SkillsUpdated { .. } => EventKind::SkillsUpdated,
            LedgerEvent::AchievementProposed { .. } => EventKind::AchievementProposed,
            LedgerEvent::AchievementAccepted { .. } => EventKind::AchievementAccepted,
        }
    }
}

/// Discriminant of [`LedgerEvent`], used to filter the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SkillsUpdated,
    AchievementProposed,
    AchievementAccepted,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::SkillsUpdated => "skills_updated",
            EventKind::AchievementProposed => "achievement_proposed",
            EventKind::AchievementAccepted => "achievement_accepted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skills_updated" => Ok(EventKind::SkillsUpdated),
            "achievement_proposed" => Ok(EventKind::AchievementProposed),
            "achievement_accepted" => Ok(EventKind::AchievementAccepted),
            other => Err(format!("invalid event kind: '{other}'")),
        }
    }
}

/// A journal entry: an event plus its position in commit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Dense, starting at 1.
    pub sequence: u64,
    pub recorded_at: DateTime<Utc>,
    pub event: LedgerEvent,
}
