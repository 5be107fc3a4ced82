//! Adoption phases
//!
//! Every radar item sits in exactly one of four phases. Radar documents
//! introduce a phase with a `#` header whose text is locale-specific; the
//! default headers are Norwegian.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("Unknown phase '{0}': expected observe, trial, adopt or avoid")]
pub struct UnknownPhase(pub String);

/// Adoption stage of a technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// On the watch list, not yet decided
    Observe,
    /// Being tried out in pilots or limited settings
    Trial,
    /// Approved and recommended for production
    Adopt,
    /// Being phased out or rejected
    Avoid,
}

impl Phase {
    /// All phases in canonical order
    pub const ALL: [Phase; 4] = [Phase::Observe, Phase::Trial, Phase::Adopt, Phase::Avoid];

    /// Stable lowercase key
    pub fn key(&self) -> &'static str {
        match self {
            Phase::Observe => "observe",
            Phase::Trial => "trial",
            Phase::Adopt => "adopt",
            Phase::Avoid => "avoid",
        }
    }

    /// Position in canonical order
    pub fn index(&self) -> usize {
        match self {
            Phase::Observe => 0,
            Phase::Trial => 1,
            Phase::Adopt => 2,
            Phase::Avoid => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.key() == s.trim())
            .ok_or_else(|| UnknownPhase(s.to_string()))
    }
}

/// Header text recognised for each phase
///
/// Matching is exact and case-sensitive: `# prøve` does not open the trial
/// phase when the configured header is `Prøve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseHeaders {
    pub observe: String,
    pub trial: String,
    pub adopt: String,
    pub avoid: String,
}

impl Default for PhaseHeaders {
    fn default() -> Self {
        Self {
            observe: "Observere".to_string(),
            trial: "Prøve".to_string(),
            adopt: "Bruke".to_string(),
            avoid: "Unngå".to_string(),
        }
    }
}

impl PhaseHeaders {
    /// Returns the header text for a phase
    pub fn header(&self, phase: Phase) -> &str {
        match phase {
            Phase::Observe => &self.observe,
            Phase::Trial => &self.trial,
            Phase::Adopt => &self.adopt,
            Phase::Avoid => &self.avoid,
        }
    }

    /// Looks up the phase a header opens, if any
    pub fn phase_for(&self, header: &str) -> Option<Phase> {
        Phase::ALL.into_iter().find(|p| self.header(*p) == header)
    }
}
