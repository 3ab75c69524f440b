// Players, contracts and the per-team roster snapshot the power scorer reads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::team::TeamId;

pub type PlayerId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    /// Free-text position as entered, e.g. "Left Back" or "Striker".
    pub position: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub team_id: Option<TeamId>,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: Uuid,
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub salary_per_year: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A player together with every contract they have signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub player: Player,
    pub contracts: Vec<Contract>,
}

impl RosterPlayer {
    /// The contract with the latest start date, if any.
    pub fn latest_contract(&self) -> Option<&Contract> {
        self.contracts.iter().max_by_key(|c| c.start_date)
    }
}

/// Everyone currently registered with a team.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamRoster {
    pub team_id: TeamId,
    pub players: Vec<RosterPlayer>,
}

impl TeamRoster {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Number of players whose position text falls in `group`.
    pub fn count_in(&self, group: PositionGroup) -> usize {
        self.players
            .iter()
            .filter(|rp| {
                rp.player
                    .position
                    .as_deref()
                    .is_some_and(|pos| group.matches(pos))
            })
            .count()
    }
}

// ---------------------------------------------------------------------------
// Position groups
// ---------------------------------------------------------------------------

/// Coarse position buckets used for tactical balance. A position string may
/// match more than one bucket; each bucket is counted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionGroup {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PositionGroup {
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            PositionGroup::Goalkeeper => &["goalkeeper", "portar"],
            PositionGroup::Defender => &["defender", "back", "fundas"],
            PositionGroup::Midfielder => &["midfield", "mijlocas"],
            PositionGroup::Forward => &["forward", "striker", "atacant"],
        }
    }

    /// Case-insensitive keyword match against a free-text position.
    pub fn matches(&self, position: &str) -> bool {
        let lower = position.to_lowercase();
        self.keywords().iter().any(|kw| lower.contains(kw))
    }
}
