// Competitions, editions and the scheduling format an edition is played in.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type CompetitionId = Uuid;
pub type EditionId = Uuid;

/// The scheduling format of an edition. The set is closed: every consumer
/// matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    RoundRobin,
    RoundRobinDouble,
    Knockout,
}

impl Strategy {
    /// Parse a strategy name.
    ///
    /// Accepts the canonical names (`RoundRobin`, `RoundRobinDouble`,
    /// `Knockout`) case-insensitively, snake_case forms, and the legacy
    /// `ROBIN_ROUND` / `ROBIN_ROUND_DOUBLE` spellings.
    pub fn from_str_name(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "roundrobin" | "robinround" => Some(Strategy::RoundRobin),
            "roundrobindouble" | "robinrounddouble" | "doubleroundrobin" => {
                Some(Strategy::RoundRobinDouble)
            }
            "knockout" => Some(Strategy::Knockout),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::RoundRobin => "RoundRobin",
            Strategy::RoundRobinDouble => "RoundRobinDouble",
            Strategy::Knockout => "Knockout",
        }
    }

    /// Whether editions in this format keep a standings table.
    pub fn has_standings(&self) -> bool {
        !matches!(self, Strategy::Knockout)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
}

/// One running instance of a competition (e.g. a season).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    pub id: EditionId,
    pub name: String,
    pub competition_id: CompetitionId,
    pub strategy: Strategy,
}
