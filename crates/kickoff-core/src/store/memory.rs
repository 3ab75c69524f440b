// HashMap-backed collaborator store for unit tests.

use std::collections::HashMap;

use anyhow::Result;

use super::{MatchStore, RosterSource, StandingsStore, TeamDirectory};
use crate::domain::{
    EditionId, Fixture, MatchEvent, MatchId, MatchStatus, Player, PlayerId, RosterPlayer, Team,
    TeamId, TeamRoster,
};
use crate::standings::StandingsEntry;

#[derive(Default)]
pub(crate) struct MemoryStore {
    pub teams: Vec<Team>,
    pub edition_teams: HashMap<EditionId, Vec<TeamId>>,
    pub rosters: HashMap<TeamId, Vec<RosterPlayer>>,
    pub fixtures: Vec<Fixture>,
    pub standings: HashMap<EditionId, Vec<StandingsEntry>>,
}

impl MemoryStore {
    pub fn with_edition(edition: EditionId, teams: &[Team]) -> Self {
        MemoryStore {
            teams: teams.to_vec(),
            edition_teams: HashMap::from([(edition, teams.iter().map(|t| t.id).collect())]),
            ..Default::default()
        }
    }
}

impl TeamDirectory for MemoryStore {
    fn team(&self, id: TeamId) -> Result<Option<Team>> {
        Ok(self.teams.iter().find(|t| t.id == id).cloned())
    }

    fn teams_in_edition(&self, edition: EditionId) -> Result<Vec<Team>> {
        let ids = self.edition_teams.get(&edition).cloned().unwrap_or_default();
        Ok(ids
            .into_iter()
            .filter_map(|id| self.teams.iter().find(|t| t.id == id).cloned())
            .collect())
    }
}

impl RosterSource for MemoryStore {
    fn roster(&self, team: TeamId) -> Result<TeamRoster> {
        Ok(TeamRoster {
            team_id: team,
            players: self.rosters.get(&team).cloned().unwrap_or_default(),
        })
    }

    fn player(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self
            .rosters
            .values()
            .flatten()
            .find(|rp| rp.player.id == id)
            .map(|rp| rp.player.clone()))
    }
}

impl MatchStore for MemoryStore {
    fn insert_fixtures(&mut self, fixtures: &[Fixture]) -> Result<()> {
        self.fixtures.extend_from_slice(fixtures);
        Ok(())
    }

    fn fixture(&self, id: MatchId) -> Result<Option<Fixture>> {
        Ok(self.fixtures.iter().find(|f| f.id == id).cloned())
    }

    fn update_fixture(&mut self, fixture: &Fixture) -> Result<()> {
        if let Some(slot) = self.fixtures.iter_mut().find(|f| f.id == fixture.id) {
            *slot = fixture.clone();
        }
        Ok(())
    }

    fn fixtures_for_edition(
        &self,
        edition: EditionId,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Fixture>> {
        let mut out: Vec<Fixture> = self
            .fixtures
            .iter()
            .filter(|f| f.edition_id == edition)
            .filter(|f| status.map_or(true, |s| f.status == s))
            .cloned()
            .collect();
        out.sort_by_key(|f| (f.round, f.kickoff));
        Ok(out)
    }

    fn insert_event(&mut self, event: &MatchEvent) -> Result<()> {
        if let Some(f) = self.fixtures.iter_mut().find(|f| f.id == event.match_id) {
            f.events.push(event.clone());
        }
        Ok(())
    }
}

impl StandingsStore for MemoryStore {
    fn standings(&self, edition: EditionId) -> Result<Vec<StandingsEntry>> {
        Ok(self.standings.get(&edition).cloned().unwrap_or_default())
    }

    fn save_standings(&mut self, edition: EditionId, entries: &[StandingsEntry]) -> Result<()> {
        self.standings.insert(edition, entries.to_vec());
        Ok(())
    }
}
