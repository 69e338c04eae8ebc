use serde::Serialize;
use std::{fmt, str::FromStr};

use crate::error::{ConfigError, PaxosError};

/// How many affirmative answers a phase needs, as a function of collection size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuorumPolicy {
    /// Simple majority: `n / 2 + 1`.
    Classic,
    /// Two thirds plus one: `2n / 3 + 1`.
    Fast,
}

impl QuorumPolicy {
    pub fn size(self, acceptors: usize) -> Result<usize, PaxosError> {
        if acceptors == 0 {
            return Err(PaxosError::NoAcceptors);
        }
        Ok(match self {
            QuorumPolicy::Classic => acceptors / 2 + 1,
            QuorumPolicy::Fast => acceptors * 2 / 3 + 1,
        })
    }
}

impl fmt::Display for QuorumPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuorumPolicy::Classic => f.write_str("classic"),
            QuorumPolicy::Fast => f.write_str("fast"),
        }
    }
}

impl FromStr for QuorumPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(QuorumPolicy::Classic),
            "fast" => Ok(QuorumPolicy::Fast),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}
