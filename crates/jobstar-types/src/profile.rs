use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Identifier of a profile in the external identity registry.
///
/// Profiles are opaque positive integers. The ledger never creates them; it
/// only asks the ownership oracle who currently owns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub u64);

impl ProfileId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProfileId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>() {
            Ok(0) => Err("profile id must be positive".to_string()),
            Ok(id) => Ok(Self(id)),
            Err(e) => Err(format!("invalid profile id '{s}': {e}")),
        }
    }
}

/// Account address of a caller (the identity that owns profiles).
///
/// Compared by exact string equality; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("address cannot be empty".to_string());
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(format!("address '{trimmed}' contains whitespace"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// A profile as recorded by the local identity registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    /// Unique human-readable handle chosen at mint time.
    pub handle: String,
    /// Current owner.
    pub owner: Address,
}
