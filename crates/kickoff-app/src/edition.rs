// Edition orchestration: creation, dashboards, match updates, events and
// contracts, each run as one database transaction.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use kickoff_core::domain::{
    Competition, CompetitionId, Contract, Edition, EditionId, Fixture, MatchEvent, MatchEventKind,
    MatchId, MatchStatus, Player, PlayerId, Strategy, Team, TeamId,
};
use kickoff_core::power::{OutcomeDecider, PowerBreakdown, TeamPowerScorer};
use kickoff_core::schedule::{into_fixtures, ScheduleGenerator};
use kickoff_core::standings::get_standings;
use kickoff_core::store::{MatchStore, RosterSource, TeamDirectory};
use kickoff_core::{EngineError, Result};

use crate::config::Config;
use crate::db::{Database, SqlStore};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// What a new edition is made of. Team order is the order teams are
/// registered and fed to the schedule generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditionRequest {
    pub name: String,
    pub strategy: Strategy,
    pub team_ids: Vec<TeamId>,
}

/// Partial update of a fixture. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct MatchUpdate {
    pub status: Option<MatchStatus>,
    pub kickoff: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewMatchEvent {
    pub kind: MatchEventKind,
    pub minute: u32,
    pub primary_player: Option<PlayerId>,
    pub secondary_player: Option<PlayerId>,
    pub detail: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub team_id: Option<TeamId>,
}

#[derive(Debug, Clone)]
pub struct NewContract {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub salary_per_year: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Dashboard view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub edition_id: EditionId,
    pub edition_name: String,
    pub competition_id: CompetitionId,
    pub competition_name: String,
    pub strategy: Strategy,
    /// Ranked rows; empty for knockout editions.
    pub standings: Vec<StandingsRow>,
    pub rounds: Vec<RoundView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StandingsRow {
    pub position: usize,
    pub team_id: TeamId,
    pub team_name: String,
    pub points: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundView {
    /// Zero-based round index.
    pub round: u32,
    pub fixtures: Vec<FixtureView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixtureView {
    pub id: MatchId,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub status: MatchStatus,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

pub struct EditionService<'a> {
    db: &'a Database,
    config: &'a Config,
}

impl<'a> EditionService<'a> {
    pub fn new(db: &'a Database, config: &'a Config) -> Self {
        EditionService { db, config }
    }

    // ------------------------------------------------------------------
    // Competitions and editions
    // ------------------------------------------------------------------

    /// Create a competition together with its first edition.
    pub fn create_competition(
        &self,
        name: &str,
        first: &EditionRequest,
    ) -> Result<(Competition, Edition)> {
        self.create_competition_at(name, first, Utc::now())
    }

    pub fn create_competition_at(
        &self,
        name: &str,
        first: &EditionRequest,
        now: DateTime<Utc>,
    ) -> Result<(Competition, Edition)> {
        self.db.write(|store| {
            let competition = Competition {
                id: Uuid::new_v4(),
                name: name.to_string(),
            };
            store.insert_competition(&competition)?;
            let edition = self.build_edition(store, competition.id, first, now)?;
            Ok((competition, edition))
        })
    }

    /// Create an edition of an existing competition: register teams, generate
    /// and persist fixtures and (except for knockout) a zeroed table.
    pub fn create_edition(
        &self,
        competition: CompetitionId,
        request: &EditionRequest,
    ) -> Result<Edition> {
        self.create_edition_at(competition, request, Utc::now())
    }

    pub fn create_edition_at(
        &self,
        competition: CompetitionId,
        request: &EditionRequest,
        now: DateTime<Utc>,
    ) -> Result<Edition> {
        self.db.write(|store| {
            if store.competition(competition)?.is_none() {
                return Err(EngineError::not_found("competition", competition));
            }
            self.build_edition(store, competition, request, now)
        })
    }

    fn build_edition(
        &self,
        store: &mut SqlStore<'_>,
        competition: CompetitionId,
        request: &EditionRequest,
        now: DateTime<Utc>,
    ) -> Result<Edition> {
        let mut seen = HashSet::new();
        let mut teams = Vec::with_capacity(request.team_ids.len());
        for &id in &request.team_ids {
            if !seen.insert(id) {
                return Err(EngineError::DuplicateTeam(id));
            }
            let team = store
                .team(id)?
                .ok_or_else(|| EngineError::not_found("team", id))?;
            teams.push(team);
        }

        let mut rng = self.edition_rng(store)?;
        let edition = Edition {
            id: uuid::Builder::from_random_bytes(rng.gen()).into_uuid(),
            name: request.name.clone(),
            competition_id: competition,
            strategy: request.strategy,
        };
        store.insert_edition(&edition, &teams)?;

        let rounds = {
            let scorer = TeamPowerScorer::new(&*store, &self.config.power, now.date_naive());
            let mut decider = OutcomeDecider::new(scorer, ChaCha8Rng::seed_from_u64(rng.gen()));
            let mut generator = ScheduleGenerator::new(&mut rng, self.config.schedule.clone());
            generator.generate(edition.strategy, edition.id, &teams, now, &mut decider)?
        };
        let fixtures = into_fixtures(rounds);
        store.insert_fixtures(&fixtures)?;

        if edition.strategy.has_standings() {
            kickoff_core::standings::initialize_standings(store, edition.id, &teams)?;
        }

        info!(
            "created {} edition {:?} ({}) with {} teams and {} fixtures",
            edition.strategy,
            edition.name,
            edition.id,
            teams.len(),
            fixtures.len()
        );
        Ok(edition)
    }

    /// Seeded when the config carries a seed. Each edition draws from its own
    /// stream, taken from a counter that survives deletions, so editions
    /// created from one seed never share ids.
    fn edition_rng(&self, store: &mut SqlStore<'_>) -> Result<ChaCha8Rng> {
        match self.config.random.seed {
            Some(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                rng.set_stream(store.next_edition_stream()?);
                Ok(rng)
            }
            None => Ok(ChaCha8Rng::from_entropy()),
        }
    }

    pub fn editions(&self) -> Result<Vec<Edition>> {
        Ok(self.db.read(|store| store.editions())?)
    }

    pub fn editions_for_competition(&self, competition: CompetitionId) -> Result<Vec<Edition>> {
        self.db.read(|store| {
            if store.competition(competition)?.is_none() {
                return Err(EngineError::not_found("competition", competition));
            }
            Ok(store.editions_for_competition(competition)?)
        })
    }

    pub fn rename_edition(&self, id: EditionId, name: &str) -> Result<()> {
        self.db.write(|store| {
            if !store.rename_edition(id, name)? {
                return Err(EngineError::not_found("edition", id));
            }
            Ok(())
        })
    }

    /// Delete an edition with its fixtures, events, membership and table.
    pub fn delete_edition(&self, id: EditionId) -> Result<()> {
        self.db.write(|store| {
            if !store.delete_edition(id)? {
                return Err(EngineError::not_found("edition", id));
            }
            info!("deleted edition {}", id);
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    /// Recompute the table, then assemble standings and fixtures by round.
    pub fn dashboard(&self, id: EditionId) -> Result<Dashboard> {
        self.db.write(|store| {
            let edition = store
                .edition(id)?
                .ok_or_else(|| EngineError::not_found("edition", id))?;
            let competition = store
                .competition(edition.competition_id)?
                .ok_or_else(|| EngineError::not_found("competition", edition.competition_id))?;

            let ranked = get_standings(store, id)?;
            let fixtures = store.fixtures_for_edition(id, None)?;

            let store: &SqlStore<'_> = store;
            let names: HashMap<TeamId, String> = store
                .teams_in_edition(id)?
                .into_iter()
                .map(|t| (t.id, t.name))
                .collect();
            let name_of = |team: TeamId| -> Result<String> {
                if let Some(name) = names.get(&team) {
                    return Ok(name.clone());
                }
                Ok(store
                    .team(team)?
                    .map(|t| t.name)
                    .unwrap_or_else(|| team.to_string()))
            };

            let mut standings = Vec::with_capacity(ranked.len());
            for (i, e) in ranked.iter().enumerate() {
                standings.push(StandingsRow {
                    position: i + 1,
                    team_id: e.team_id,
                    team_name: name_of(e.team_id)?,
                    points: e.points(),
                    played: e.played(),
                    wins: e.wins,
                    draws: e.draws,
                    losses: e.losses,
                    goals_for: e.goals_for,
                    goals_against: e.goals_against,
                    goal_difference: e.goal_difference(),
                });
            }

            let mut by_round: BTreeMap<u32, Vec<FixtureView>> = BTreeMap::new();
            for f in fixtures {
                by_round.entry(f.round).or_default().push(FixtureView {
                    id: f.id,
                    home_team: name_of(f.home)?,
                    away_team: name_of(f.away)?,
                    kickoff: f.kickoff,
                    home_goals: f.home_goals,
                    away_goals: f.away_goals,
                    status: f.status,
                });
            }
            let rounds = by_round
                .into_iter()
                .map(|(round, mut fixtures)| {
                    fixtures.sort_by_key(|f| f.kickoff);
                    RoundView { round, fixtures }
                })
                .collect();

            debug!("built dashboard for edition {}", id);
            Ok(Dashboard {
                edition_id: edition.id,
                edition_name: edition.name,
                competition_id: competition.id,
                competition_name: competition.name,
                strategy: edition.strategy,
                standings,
                rounds,
            })
        })
    }

    // ------------------------------------------------------------------
    // Matches
    // ------------------------------------------------------------------

    fn load_fixture(store: &SqlStore<'_>, id: MatchId) -> Result<Fixture> {
        store
            .fixture(id)?
            .ok_or_else(|| EngineError::not_found("match", id))
    }

    /// Change status and/or kickoff. Status moves must follow the match
    /// lifecycle.
    pub fn update_match(&self, id: MatchId, update: &MatchUpdate) -> Result<Fixture> {
        self.db.write(|store| {
            let mut fixture = Self::load_fixture(store, id)?;
            if let Some(status) = update.status {
                fixture.transition_to(status)?;
            }
            if let Some(kickoff) = update.kickoff {
                fixture.kickoff = kickoff;
            }
            store.update_fixture(&fixture)?;
            Ok(fixture)
        })
    }

    /// Apply a final score and finish the match.
    pub fn record_result(&self, id: MatchId, home_goals: u32, away_goals: u32) -> Result<Fixture> {
        self.db.write(|store| {
            let mut fixture = Self::load_fixture(store, id)?;
            fixture.record_result(home_goals, away_goals)?;
            store.update_fixture(&fixture)?;
            info!("match {} finished {}-{}", id, home_goals, away_goals);
            Ok(fixture)
        })
    }

    /// Store an event. A goal credits the scorer's team if it plays in the
    /// match.
    pub fn record_event(&self, id: MatchId, new: &NewMatchEvent) -> Result<MatchEvent> {
        self.db.write(|store| {
            let mut fixture = Self::load_fixture(store, id)?;

            let mut scorer = None;
            for player_id in [new.primary_player, new.secondary_player].into_iter().flatten() {
                let player = store
                    .player(player_id)?
                    .ok_or_else(|| EngineError::not_found("player", player_id))?;
                if Some(player_id) == new.primary_player {
                    scorer = Some(player);
                }
            }

            let event = MatchEvent {
                id: Uuid::new_v4(),
                match_id: id,
                kind: new.kind,
                minute: new.minute,
                primary_player: new.primary_player,
                secondary_player: new.secondary_player,
                detail: new.detail.clone(),
            };
            store.insert_event(&event)?;

            if new.kind == MatchEventKind::Goal {
                let credited = scorer
                    .as_ref()
                    .and_then(|p| p.team_id)
                    .is_some_and(|team| fixture.credit_goal(team));
                if credited {
                    store.update_fixture(&fixture)?;
                } else {
                    warn!(
                        "goal in match {} at minute {} not credited: scorer plays for neither side",
                        id, new.minute
                    );
                }
            }
            Ok(event)
        })
    }

    pub fn events_for_match(&self, id: MatchId) -> Result<Vec<MatchEvent>> {
        self.db.read(|store| {
            Self::load_fixture(store, id)?;
            Ok(store.events_for_match(id)?)
        })
    }

    // ------------------------------------------------------------------
    // Teams, players, contracts
    // ------------------------------------------------------------------

    pub fn insert_team(&self, name: &str) -> Result<Team> {
        self.db.write(|store| {
            let team = Team::new(Uuid::new_v4(), name);
            store.insert_team(&team)?;
            Ok(team)
        })
    }

    pub fn insert_player(&self, new: &NewPlayer) -> Result<Player> {
        self.db.write(|store| {
            if let Some(team) = new.team_id {
                if store.team(team)?.is_none() {
                    return Err(EngineError::not_found("team", team));
                }
            }
            let player = Player {
                id: Uuid::new_v4(),
                first_name: new.first_name.clone(),
                last_name: new.last_name.clone(),
                position: new.position.clone(),
                date_of_birth: new.date_of_birth,
                team_id: new.team_id,
            };
            store.insert_player(&player)?;
            Ok(player)
        })
    }

    /// Record a contract and move the player to the contract's team.
    pub fn sign_contract(&self, new: &NewContract) -> Result<Contract> {
        if new.end_date < new.start_date {
            return Err(EngineError::InvalidContract(format!(
                "end date {} is before start date {}",
                new.end_date, new.start_date
            )));
        }
        self.db.write(|store| {
            if store.player(new.player_id)?.is_none() {
                return Err(EngineError::not_found("player", new.player_id));
            }
            if store.team(new.team_id)?.is_none() {
                return Err(EngineError::not_found("team", new.team_id));
            }
            let latest = store
                .contracts_for_player(new.player_id)?
                .into_iter()
                .map(|c| c.start_date)
                .max();
            if let Some(latest) = latest {
                if new.start_date < latest {
                    return Err(EngineError::InvalidContract(format!(
                        "start date {} precedes the player's current contract start {}",
                        new.start_date, latest
                    )));
                }
            }

            let contract = Contract {
                id: Uuid::new_v4(),
                player_id: new.player_id,
                team_id: new.team_id,
                salary_per_year: new.salary_per_year,
                start_date: new.start_date,
                end_date: new.end_date,
            };
            store.insert_contract(&contract)?;
            store.set_player_team(new.player_id, Some(new.team_id))?;
            Ok(contract)
        })
    }

    /// All five sub-scores plus the composite, as of today.
    pub fn score_team(&self, team: TeamId) -> Result<PowerBreakdown> {
        self.score_team_on(team, Utc::now().date_naive())
    }

    pub fn score_team_on(&self, team: TeamId, today: NaiveDate) -> Result<PowerBreakdown> {
        self.db.read(|store| {
            if store.team(team)?.is_none() {
                return Err(EngineError::not_found("team", team));
            }
            TeamPowerScorer::new(store, &self.config.power, today).score_team(team)
        })
    }
}
