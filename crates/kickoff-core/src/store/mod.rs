// Collaborator interfaces the engine consumes. Persistence lives elsewhere;
// the engine only talks to these traits.

use anyhow::Result;

use crate::domain::{
    EditionId, Fixture, MatchEvent, MatchId, MatchStatus, Player, PlayerId, Team, TeamId,
    TeamRoster,
};
use crate::standings::StandingsEntry;

#[cfg(test)]
pub(crate) mod memory;

/// Team lookup.
pub trait TeamDirectory {
    fn team(&self, id: TeamId) -> Result<Option<Team>>;

    /// Teams registered for an edition, in the order they were registered.
    fn teams_in_edition(&self, edition: EditionId) -> Result<Vec<Team>>;
}

/// Roster and contract lookup by team.
pub trait RosterSource {
    /// Every player currently registered with `team`, with all their
    /// contracts. An unknown team yields an empty roster.
    fn roster(&self, team: TeamId) -> Result<TeamRoster>;

    fn player(&self, id: PlayerId) -> Result<Option<Player>>;
}

/// Fixture persistence.
pub trait MatchStore {
    fn insert_fixtures(&mut self, fixtures: &[Fixture]) -> Result<()>;

    fn fixture(&self, id: MatchId) -> Result<Option<Fixture>>;

    /// Persist status, kickoff and goal counters of an existing fixture.
    fn update_fixture(&mut self, fixture: &Fixture) -> Result<()>;

    /// Fixtures of an edition ordered by round then kickoff, optionally
    /// filtered by status.
    fn fixtures_for_edition(
        &self,
        edition: EditionId,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Fixture>>;

    fn insert_event(&mut self, event: &MatchEvent) -> Result<()>;
}

/// Standings persistence. The entry set of an edition is always replaced
/// wholesale.
pub trait StandingsStore {
    /// Entries in insertion order. Empty means the edition has no table.
    fn standings(&self, edition: EditionId) -> Result<Vec<StandingsEntry>>;

    fn save_standings(&mut self, edition: EditionId, entries: &[StandingsEntry]) -> Result<()>;
}
