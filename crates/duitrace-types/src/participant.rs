//! Participant types for DuitRace
//!
//! Display attributes are owned by the external user directory; the
//! leaderboard only joins them in for presentation and search.

use crate::ParticipantId;
use serde::{Deserialize, Serialize};

/// Kind of competitor on a leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    /// An individual student
    Individual,
    /// A registered entrepreneur business unit
    EntrepreneurUnit,
}

impl ParticipantKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Individual => "Student",
            Self::EntrepreneurUnit => "Entrepreneur Unit",
        }
    }
}

/// Display profile for one participant, as served by the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub id: ParticipantId,
    /// Display name (student name or business unit name)
    pub name: String,
    /// Faculty, college or programme affiliation
    pub affiliation: Option<String>,
    pub kind: ParticipantKind,
}

impl ParticipantProfile {
    /// Create a student profile
    pub fn individual(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            affiliation: None,
            kind: ParticipantKind::Individual,
        }
    }

    /// Create an entrepreneur unit profile
    pub fn entrepreneur_unit(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            affiliation: None,
            kind: ParticipantKind::EntrepreneurUnit,
        }
    }

    /// Set the affiliation
    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }
}
