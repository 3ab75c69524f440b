// Fixtures (matches), their status lifecycle and in-match events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::edition::EditionId;
use super::roster::PlayerId;
use super::team::TeamId;
use crate::error::{EngineError, Result};

pub type MatchId = Uuid;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
}

impl MatchStatus {
    pub fn from_str_status(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "SCHEDULED" => Some(MatchStatus::Scheduled),
            "LIVE" => Some(MatchStatus::Live),
            "FINISHED" => Some(MatchStatus::Finished),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "Scheduled",
            MatchStatus::Live => "Live",
            MatchStatus::Finished => "Finished",
        }
    }

    /// Allowed moves: Scheduled -> Live, Scheduled -> Finished,
    /// Live -> Finished.
    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        matches!(
            (self, next),
            (MatchStatus::Scheduled, MatchStatus::Live)
                | (MatchStatus::Scheduled, MatchStatus::Finished)
                | (MatchStatus::Live, MatchStatus::Finished)
        )
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchEventKind {
    Goal,
    YellowCard,
    RedCard,
    Substitution,
}

impl MatchEventKind {
    pub fn from_str_kind(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GOAL" => Some(MatchEventKind::Goal),
            "YELLOW_CARD" | "YELLOWCARD" => Some(MatchEventKind::YellowCard),
            "RED_CARD" | "REDCARD" => Some(MatchEventKind::RedCard),
            "SUBSTITUTION" => Some(MatchEventKind::Substitution),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchEventKind::Goal => "GOAL",
            MatchEventKind::YellowCard => "YELLOW_CARD",
            MatchEventKind::RedCard => "RED_CARD",
            MatchEventKind::Substitution => "SUBSTITUTION",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: Uuid,
    pub match_id: MatchId,
    pub kind: MatchEventKind,
    pub minute: u32,
    /// The scorer for goals, the booked player for cards, the player coming
    /// on for substitutions.
    pub primary_player: Option<PlayerId>,
    pub secondary_player: Option<PlayerId>,
    pub detail: Option<String>,
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// A single match between two distinct teams of one edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: MatchId,
    pub edition_id: EditionId,
    /// Zero-based index of the round this fixture was generated in.
    pub round: u32,
    pub home: TeamId,
    pub away: TeamId,
    pub kickoff: DateTime<Utc>,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub status: MatchStatus,
    pub events: Vec<MatchEvent>,
}

impl Fixture {
    /// A freshly generated fixture: scheduled, no goals, no events.
    pub fn scheduled(
        id: MatchId,
        edition_id: EditionId,
        round: u32,
        home: TeamId,
        away: TeamId,
        kickoff: DateTime<Utc>,
    ) -> Self {
        Fixture {
            id,
            edition_id,
            round,
            home,
            away,
            kickoff,
            home_goals: None,
            away_goals: None,
            status: MatchStatus::Scheduled,
            events: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }

    /// Move to `next`. Staying in the current status is a no-op. Entering
    /// `Live` or `Finished` starts absent goal counters at zero.
    pub fn transition_to(&mut self, next: MatchStatus) -> Result<()> {
        if self.status == next {
            return Ok(());
        }
        if !self.status.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.home_goals.get_or_insert(0);
        self.away_goals.get_or_insert(0);
        Ok(())
    }

    /// Apply a final score and mark the fixture finished. A fixture that is
    /// already finished is rejected.
    pub fn record_result(&mut self, home_goals: u32, away_goals: u32) -> Result<()> {
        if !self.status.can_transition_to(MatchStatus::Finished) {
            return Err(EngineError::InvalidTransition {
                from: self.status,
                to: MatchStatus::Finished,
            });
        }
        self.status = MatchStatus::Finished;
        self.home_goals = Some(home_goals);
        self.away_goals = Some(away_goals);
        Ok(())
    }

    /// Credit a goal to `team`. Returns `false` if the team plays neither
    /// side of this fixture.
    pub fn credit_goal(&mut self, team: TeamId) -> bool {
        let counter = if team == self.home {
            &mut self.home_goals
        } else if team == self.away {
            &mut self.away_goals
        } else {
            return false;
        };
        *counter = Some(counter.unwrap_or(0) + 1);
        true
    }

    /// Final score with absent counters read as zero.
    pub fn score(&self) -> (u32, u32) {
        (self.home_goals.unwrap_or(0), self.away_goals.unwrap_or(0))
    }
}
