// Standings tables: initialization, recomputation from finished fixtures, ranking.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{EditionId, Fixture, MatchStatus, Team, TeamId};
use crate::error::Result;
use crate::store::{MatchStore, StandingsStore};

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One team's row in an edition's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub team_id: TeamId,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl StandingsEntry {
    pub fn new(team_id: TeamId) -> Self {
        StandingsEntry {
            team_id,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    pub fn points(&self) -> u32 {
        3 * self.wins + self.draws
    }

    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    pub fn reset(&mut self) {
        *self = StandingsEntry::new(self.team_id);
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.goals_for += scored;
        self.goals_against += conceded;
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
            std::cmp::Ordering::Less => self.losses += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// The full table of one edition, entries kept in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsTable {
    pub edition_id: EditionId,
    entries: Vec<StandingsEntry>,
}

impl StandingsTable {
    /// One zeroed entry per team.
    pub fn initialize(edition_id: EditionId, teams: &[Team]) -> Self {
        StandingsTable {
            edition_id,
            entries: teams.iter().map(|t| StandingsEntry::new(t.id)).collect(),
        }
    }

    pub fn from_entries(edition_id: EditionId, entries: Vec<StandingsEntry>) -> Self {
        StandingsTable {
            edition_id,
            entries,
        }
    }

    pub fn entries(&self) -> &[StandingsEntry] {
        &self.entries
    }

    pub fn entry(&self, team: TeamId) -> Option<&StandingsEntry> {
        self.entries.iter().find(|e| e.team_id == team)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Zero every entry, then fold in every finished fixture. Fixtures in any
    /// other status are ignored; absent goal counters count as 0. A fixture
    /// naming a team with no entry is skipped with a warning.
    pub fn recompute<'f>(&mut self, fixtures: impl IntoIterator<Item = &'f Fixture>) {
        for e in &mut self.entries {
            e.reset();
        }

        for f in fixtures.into_iter().filter(|f| f.is_finished()) {
            let home = self.entries.iter().position(|e| e.team_id == f.home);
            let away = self.entries.iter().position(|e| e.team_id == f.away);
            let (Some(h), Some(a)) = (home, away) else {
                warn!(
                    "edition {}: match {} references a team without a standings entry, skipping",
                    self.edition_id, f.id
                );
                continue;
            };
            let (hg, ag) = f.score();
            self.entries[h].record(hg, ag);
            self.entries[a].record(ag, hg);
        }
    }

    /// Entries sorted by points, goal difference, then goals for, all
    /// descending. The sort is stable so remaining ties keep insertion order.
    pub fn ranked(&self) -> Vec<StandingsEntry> {
        let mut rows = self.entries.clone();
        rows.sort_by(|a, b| {
            b.points()
                .cmp(&a.points())
                .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
                .then_with(|| b.goals_for.cmp(&a.goals_for))
        });
        rows
    }
}

// ---------------------------------------------------------------------------
// Store-facing operations
// ---------------------------------------------------------------------------

/// Create the zeroed table for a new edition.
pub fn initialize_standings<S: StandingsStore + ?Sized>(
    store: &mut S,
    edition: EditionId,
    teams: &[Team],
) -> Result<StandingsTable> {
    let table = StandingsTable::initialize(edition, teams);
    store.save_standings(edition, table.entries())?;
    debug!("initialized standings for edition {} ({} teams)", edition, teams.len());
    Ok(table)
}

/// Rebuild an edition's table from its finished fixtures and persist it.
/// An edition without a table (knockout) yields an empty one.
pub fn recompute_standings<S: MatchStore + StandingsStore + ?Sized>(
    store: &mut S,
    edition: EditionId,
) -> Result<StandingsTable> {
    let entries = store.standings(edition)?;
    if entries.is_empty() {
        return Ok(StandingsTable::from_entries(edition, entries));
    }
    let finished = store.fixtures_for_edition(edition, Some(MatchStatus::Finished))?;
    let mut table = StandingsTable::from_entries(edition, entries);
    table.recompute(&finished);
    store.save_standings(edition, table.entries())?;
    debug!(
        "recomputed standings for edition {} from {} finished matches",
        edition,
        finished.len()
    );
    Ok(table)
}

/// Recompute, then return the ranked rows.
pub fn get_standings<S: MatchStore + StandingsStore + ?Sized>(
    store: &mut S,
    edition: EditionId,
) -> Result<Vec<StandingsEntry>> {
    Ok(recompute_standings(store, edition)?.ranked())
}
