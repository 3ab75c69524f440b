// SQLite persistence for competitions, editions, rosters, fixtures and standings.

use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use kickoff_core::domain::{
    Competition, CompetitionId, Contract, Edition, EditionId, Fixture, MatchEvent, MatchEventKind,
    MatchId, MatchStatus, Player, PlayerId, RosterPlayer, Strategy, Team, TeamId, TeamRoster,
};
use kickoff_core::standings::StandingsEntry;
use kickoff_core::store::{MatchStore, RosterSource, StandingsStore, TeamDirectory};

/// SQLite-backed storage. All access goes through `read` or `write`, which
/// hand a `SqlStore` view to a closure.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS competitions (
                id   TEXT PRIMARY KEY,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS editions (
                id             TEXT PRIMARY KEY,
                competition_id TEXT NOT NULL REFERENCES competitions(id) ON DELETE CASCADE,
                name           TEXT NOT NULL,
                strategy       TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS counters (
                name  TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS teams (
                id   TEXT PRIMARY KEY,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS edition_teams (
                edition_id TEXT NOT NULL REFERENCES editions(id) ON DELETE CASCADE,
                team_id    TEXT NOT NULL REFERENCES teams(id),
                position   INTEGER NOT NULL,
                PRIMARY KEY (edition_id, team_id)
            );

            CREATE TABLE IF NOT EXISTS players (
                id            TEXT PRIMARY KEY,
                first_name    TEXT NOT NULL,
                last_name     TEXT NOT NULL,
                position      TEXT,
                date_of_birth TEXT,
                team_id       TEXT REFERENCES teams(id)
            );

            CREATE TABLE IF NOT EXISTS contracts (
                id              TEXT PRIMARY KEY,
                player_id       TEXT NOT NULL REFERENCES players(id) ON DELETE CASCADE,
                team_id         TEXT NOT NULL REFERENCES teams(id),
                salary_per_year INTEGER NOT NULL,
                start_date      TEXT NOT NULL,
                end_date        TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS matches (
                id           TEXT PRIMARY KEY,
                edition_id   TEXT NOT NULL REFERENCES editions(id) ON DELETE CASCADE,
                round        INTEGER NOT NULL,
                home_team_id TEXT NOT NULL REFERENCES teams(id),
                away_team_id TEXT NOT NULL REFERENCES teams(id),
                kickoff      TEXT NOT NULL,
                home_goals   INTEGER,
                away_goals   INTEGER,
                status       TEXT NOT NULL,
                CHECK (home_team_id <> away_team_id)
            );

            CREATE INDEX IF NOT EXISTS idx_matches_edition ON matches(edition_id, round, kickoff);

            CREATE TABLE IF NOT EXISTS match_events (
                id                  TEXT PRIMARY KEY,
                match_id            TEXT NOT NULL REFERENCES matches(id) ON DELETE CASCADE,
                kind                TEXT NOT NULL,
                minute              INTEGER NOT NULL,
                primary_player_id   TEXT REFERENCES players(id),
                secondary_player_id TEXT REFERENCES players(id),
                detail              TEXT
            );

            CREATE TABLE IF NOT EXISTS standings_entries (
                edition_id    TEXT NOT NULL REFERENCES editions(id) ON DELETE CASCADE,
                team_id       TEXT NOT NULL REFERENCES teams(id),
                position      INTEGER NOT NULL,
                wins          INTEGER NOT NULL DEFAULT 0,
                draws         INTEGER NOT NULL DEFAULT 0,
                losses        INTEGER NOT NULL DEFAULT 0,
                goals_for     INTEGER NOT NULL DEFAULT 0,
                goals_against INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (edition_id, team_id)
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock).
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Run `f` against a read view of the database.
    pub fn read<T, E>(&self, f: impl FnOnce(&SqlStore<'_>) -> Result<T, E>) -> Result<T, E> {
        let conn = self.conn();
        let store = SqlStore { conn: &*conn };
        f(&store)
    }

    /// Run `f` inside one transaction. Commits when `f` returns `Ok`, rolls
    /// back otherwise.
    pub fn write<T, E>(&self, f: impl FnOnce(&mut SqlStore<'_>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<anyhow::Error>,
    {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin transaction")?;
        let value = {
            let mut store = SqlStore { conn: &*tx };
            f(&mut store)?
        };
        tx.commit().context("failed to commit transaction")?;
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Column helpers
// ---------------------------------------------------------------------------

fn conversion_error(idx: usize, err: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into())
}

fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text).map_err(|e| conversion_error(idx, e.into()))
}

fn opt_uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| Uuid::parse_str(&t).map_err(|e| conversion_error(idx, e.into())))
        .transpose()
}

fn strategy_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Strategy> {
    let text: String = row.get(idx)?;
    Strategy::from_str_name(&text)
        .ok_or_else(|| conversion_error(idx, anyhow!("unknown strategy {text:?}")))
}

fn status_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<MatchStatus> {
    let text: String = row.get(idx)?;
    MatchStatus::from_str_status(&text)
        .ok_or_else(|| conversion_error(idx, anyhow!("unknown match status {text:?}")))
}

fn event_kind_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<MatchEventKind> {
    let text: String = row.get(idx)?;
    MatchEventKind::from_str_kind(&text)
        .ok_or_else(|| conversion_error(idx, anyhow!("unknown event kind {text:?}")))
}

fn opt_id(id: Option<Uuid>) -> Option<String> {
    id.map(|u| u.to_string())
}

const FIXTURE_COLUMNS: &str =
    "id, edition_id, round, home_team_id, away_team_id, kickoff, home_goals, away_goals, status";

fn fixture_from_row(row: &Row<'_>) -> rusqlite::Result<Fixture> {
    Ok(Fixture {
        id: uuid_at(row, 0)?,
        edition_id: uuid_at(row, 1)?,
        round: row.get(2)?,
        home: uuid_at(row, 3)?,
        away: uuid_at(row, 4)?,
        kickoff: row.get::<_, DateTime<Utc>>(5)?,
        home_goals: row.get(6)?,
        away_goals: row.get(7)?,
        status: status_at(row, 8)?,
        events: Vec::new(),
    })
}

const PLAYER_COLUMNS: &str = "id, first_name, last_name, position, date_of_birth, team_id";

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: uuid_at(row, 0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        position: row.get(3)?,
        date_of_birth: row.get::<_, Option<NaiveDate>>(4)?,
        team_id: opt_uuid_at(row, 5)?,
    })
}

fn edition_from_row(row: &Row<'_>) -> rusqlite::Result<Edition> {
    Ok(Edition {
        id: uuid_at(row, 0)?,
        competition_id: uuid_at(row, 1)?,
        name: row.get(2)?,
        strategy: strategy_at(row, 3)?,
    })
}

// ---------------------------------------------------------------------------
// SqlStore
// ---------------------------------------------------------------------------

/// A view over one connection (or open transaction).
pub struct SqlStore<'c> {
    conn: &'c Connection,
}

impl SqlStore<'_> {
    // ------------------------------------------------------------------
    // Competitions and editions
    // ------------------------------------------------------------------

    pub fn insert_competition(&mut self, competition: &Competition) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO competitions (id, name) VALUES (?1, ?2)",
                params![competition.id.to_string(), competition.name],
            )
            .context("failed to insert competition")?;
        Ok(())
    }

    pub fn competition(&self, id: CompetitionId) -> Result<Option<Competition>> {
        self.conn
            .query_row(
                "SELECT id, name FROM competitions WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok(Competition {
                        id: uuid_at(row, 0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .context("failed to query competition")
    }

    /// Insert an edition and its ordered team membership.
    pub fn insert_edition(&mut self, edition: &Edition, teams: &[Team]) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO editions (id, competition_id, name, strategy) VALUES (?1, ?2, ?3, ?4)",
                params![
                    edition.id.to_string(),
                    edition.competition_id.to_string(),
                    edition.name,
                    edition.strategy.as_str(),
                ],
            )
            .context("failed to insert edition")?;

        let mut stmt = self
            .conn
            .prepare("INSERT INTO edition_teams (edition_id, team_id, position) VALUES (?1, ?2, ?3)")
            .context("failed to prepare edition_teams insert")?;
        for (position, team) in teams.iter().enumerate() {
            stmt.execute(params![edition.id.to_string(), team.id.to_string(), position as i64])
                .context("failed to insert edition team")?;
        }
        Ok(())
    }

    pub fn edition(&self, id: EditionId) -> Result<Option<Edition>> {
        self.conn
            .query_row(
                "SELECT id, competition_id, name, strategy FROM editions WHERE id = ?1",
                params![id.to_string()],
                edition_from_row,
            )
            .optional()
            .context("failed to query edition")
    }

    /// Every edition, grouped by competition.
    pub fn editions(&self) -> Result<Vec<Edition>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT e.id, e.competition_id, e.name, e.strategy
                 FROM editions e JOIN competitions c ON c.id = e.competition_id
                 ORDER BY c.name, e.name",
            )
            .context("failed to prepare editions query")?;
        let editions = stmt
            .query_map([], edition_from_row)
            .context("failed to query editions")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map edition rows")?;
        Ok(editions)
    }

    pub fn editions_for_competition(&self, competition: CompetitionId) -> Result<Vec<Edition>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, competition_id, name, strategy FROM editions
                 WHERE competition_id = ?1 ORDER BY name",
            )
            .context("failed to prepare editions_for_competition query")?;
        let editions = stmt
            .query_map(params![competition.to_string()], edition_from_row)
            .context("failed to query editions for competition")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map edition rows")?;
        Ok(editions)
    }

    /// Returns `false` if no edition has this id.
    pub fn rename_edition(&mut self, id: EditionId, name: &str) -> Result<bool> {
        let n = self
            .conn
            .execute(
                "UPDATE editions SET name = ?2 WHERE id = ?1",
                params![id.to_string(), name],
            )
            .context("failed to rename edition")?;
        Ok(n > 0)
    }

    /// Delete an edition; fixtures, events, membership and standings go with
    /// it. Returns `false` if no edition has this id.
    pub fn delete_edition(&mut self, id: EditionId) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM editions WHERE id = ?1", params![id.to_string()])
            .context("failed to delete edition")?;
        Ok(n > 0)
    }

    /// Next value of the edition counter, starting at 0. The counter only
    /// moves forward, so deleting editions never hands out a value twice.
    pub fn next_edition_stream(&mut self) -> Result<u64> {
        let value: i64 = self
            .conn
            .query_row(
                "INSERT INTO counters (name, value) VALUES ('edition_stream', 0)
                 ON CONFLICT(name) DO UPDATE SET value = value + 1
                 RETURNING value",
                [],
                |row| row.get(0),
            )
            .context("failed to advance edition counter")?;
        u64::try_from(value).context("edition counter is negative")
    }

    // ------------------------------------------------------------------
    // Teams, players, contracts
    // ------------------------------------------------------------------

    pub fn insert_team(&mut self, team: &Team) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO teams (id, name) VALUES (?1, ?2)",
                params![team.id.to_string(), team.name],
            )
            .context("failed to insert team")?;
        Ok(())
    }

    pub fn insert_player(&mut self, player: &Player) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO players (id, first_name, last_name, position, date_of_birth, team_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    player.id.to_string(),
                    player.first_name,
                    player.last_name,
                    player.position,
                    player.date_of_birth,
                    opt_id(player.team_id),
                ],
            )
            .context("failed to insert player")?;
        Ok(())
    }

    pub fn set_player_team(&mut self, player: PlayerId, team: Option<TeamId>) -> Result<()> {
        self.conn
            .execute(
                "UPDATE players SET team_id = ?2 WHERE id = ?1",
                params![player.to_string(), opt_id(team)],
            )
            .context("failed to update player team")?;
        Ok(())
    }

    pub fn insert_contract(&mut self, contract: &Contract) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO contracts (id, player_id, team_id, salary_per_year, start_date, end_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    contract.id.to_string(),
                    contract.player_id.to_string(),
                    contract.team_id.to_string(),
                    contract.salary_per_year,
                    contract.start_date,
                    contract.end_date,
                ],
            )
            .context("failed to insert contract")?;
        Ok(())
    }

    /// All contracts of a player, oldest start first.
    pub fn contracts_for_player(&self, player: PlayerId) -> Result<Vec<Contract>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, player_id, team_id, salary_per_year, start_date, end_date
                 FROM contracts WHERE player_id = ?1 ORDER BY start_date",
            )
            .context("failed to prepare contracts query")?;
        let contracts = stmt
            .query_map(params![player.to_string()], |row| {
                Ok(Contract {
                    id: uuid_at(row, 0)?,
                    player_id: uuid_at(row, 1)?,
                    team_id: uuid_at(row, 2)?,
                    salary_per_year: row.get(3)?,
                    start_date: row.get(4)?,
                    end_date: row.get(5)?,
                })
            })
            .context("failed to query contracts")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map contract rows")?;
        Ok(contracts)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Events of a match in minute order.
    pub fn events_for_match(&self, id: MatchId) -> Result<Vec<MatchEvent>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, match_id, kind, minute, primary_player_id, secondary_player_id, detail
                 FROM match_events WHERE match_id = ?1 ORDER BY minute, rowid",
            )
            .context("failed to prepare match events query")?;
        let events = stmt
            .query_map(params![id.to_string()], |row| {
                Ok(MatchEvent {
                    id: uuid_at(row, 0)?,
                    match_id: uuid_at(row, 1)?,
                    kind: event_kind_at(row, 2)?,
                    minute: row.get(3)?,
                    primary_player: opt_uuid_at(row, 4)?,
                    secondary_player: opt_uuid_at(row, 5)?,
                    detail: row.get(6)?,
                })
            })
            .context("failed to query match events")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map match event rows")?;
        Ok(events)
    }
}

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

impl TeamDirectory for SqlStore<'_> {
    fn team(&self, id: TeamId) -> Result<Option<Team>> {
        self.conn
            .query_row(
                "SELECT id, name FROM teams WHERE id = ?1",
                params![id.to_string()],
                |row| Ok(Team::new(uuid_at(row, 0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .context("failed to query team")
    }

    fn teams_in_edition(&self, edition: EditionId) -> Result<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT t.id, t.name FROM edition_teams et JOIN teams t ON t.id = et.team_id
                 WHERE et.edition_id = ?1 ORDER BY et.position",
            )
            .context("failed to prepare edition teams query")?;
        let teams = stmt
            .query_map(params![edition.to_string()], |row| {
                Ok(Team::new(uuid_at(row, 0)?, row.get::<_, String>(1)?))
            })
            .context("failed to query edition teams")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map team rows")?;
        Ok(teams)
    }
}

impl RosterSource for SqlStore<'_> {
    fn roster(&self, team: TeamId) -> Result<TeamRoster> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {PLAYER_COLUMNS} FROM players WHERE team_id = ?1 ORDER BY last_name, first_name"
            ))
            .context("failed to prepare roster query")?;
        let players = stmt
            .query_map(params![team.to_string()], player_from_row)
            .context("failed to query roster")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map player rows")?;

        let mut roster = TeamRoster {
            team_id: team,
            players: Vec::with_capacity(players.len()),
        };
        for player in players {
            let contracts = self.contracts_for_player(player.id)?;
            roster.players.push(RosterPlayer { player, contracts });
        }
        Ok(roster)
    }

    fn player(&self, id: PlayerId) -> Result<Option<Player>> {
        self.conn
            .query_row(
                &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1"),
                params![id.to_string()],
                player_from_row,
            )
            .optional()
            .context("failed to query player")
    }
}

impl MatchStore for SqlStore<'_> {
    fn insert_fixtures(&mut self, fixtures: &[Fixture]) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "INSERT INTO matches ({FIXTURE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ))
            .context("failed to prepare fixture insert")?;
        for f in fixtures {
            stmt.execute(params![
                f.id.to_string(),
                f.edition_id.to_string(),
                f.round,
                f.home.to_string(),
                f.away.to_string(),
                f.kickoff,
                f.home_goals,
                f.away_goals,
                f.status.as_str(),
            ])
            .with_context(|| format!("failed to insert fixture {}", f.id))?;
        }
        Ok(())
    }

    fn fixture(&self, id: MatchId) -> Result<Option<Fixture>> {
        let fixture = self
            .conn
            .query_row(
                &format!("SELECT {FIXTURE_COLUMNS} FROM matches WHERE id = ?1"),
                params![id.to_string()],
                fixture_from_row,
            )
            .optional()
            .context("failed to query fixture")?;
        match fixture {
            Some(mut f) => {
                f.events = self.events_for_match(f.id)?;
                Ok(Some(f))
            }
            None => Ok(None),
        }
    }

    fn update_fixture(&mut self, fixture: &Fixture) -> Result<()> {
        self.conn
            .execute(
                "UPDATE matches SET kickoff = ?2, home_goals = ?3, away_goals = ?4, status = ?5
                 WHERE id = ?1",
                params![
                    fixture.id.to_string(),
                    fixture.kickoff,
                    fixture.home_goals,
                    fixture.away_goals,
                    fixture.status.as_str(),
                ],
            )
            .context("failed to update fixture")?;
        Ok(())
    }

    fn fixtures_for_edition(
        &self,
        edition: EditionId,
        status: Option<MatchStatus>,
    ) -> Result<Vec<Fixture>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {FIXTURE_COLUMNS} FROM matches
                 WHERE edition_id = ?1 AND (?2 IS NULL OR status = ?2)
                 ORDER BY round, kickoff, rowid"
            ))
            .context("failed to prepare fixtures query")?;
        let mut fixtures = stmt
            .query_map(
                params![edition.to_string(), status.map(|s| s.as_str())],
                fixture_from_row,
            )
            .context("failed to query fixtures")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map fixture rows")?;
        for f in &mut fixtures {
            f.events = self.events_for_match(f.id)?;
        }
        Ok(fixtures)
    }

    fn insert_event(&mut self, event: &MatchEvent) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO match_events
                    (id, match_id, kind, minute, primary_player_id, secondary_player_id, detail)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    event.id.to_string(),
                    event.match_id.to_string(),
                    event.kind.as_str(),
                    event.minute,
                    opt_id(event.primary_player),
                    opt_id(event.secondary_player),
                    event.detail,
                ],
            )
            .context("failed to insert match event")?;
        Ok(())
    }
}

impl StandingsStore for SqlStore<'_> {
    fn standings(&self, edition: EditionId) -> Result<Vec<StandingsEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT team_id, wins, draws, losses, goals_for, goals_against
                 FROM standings_entries WHERE edition_id = ?1 ORDER BY position",
            )
            .context("failed to prepare standings query")?;
        let entries = stmt
            .query_map(params![edition.to_string()], |row| {
                Ok(StandingsEntry {
                    team_id: uuid_at(row, 0)?,
                    wins: row.get(1)?,
                    draws: row.get(2)?,
                    losses: row.get(3)?,
                    goals_for: row.get(4)?,
                    goals_against: row.get(5)?,
                })
            })
            .context("failed to query standings")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map standings rows")?;
        Ok(entries)
    }

    fn save_standings(&mut self, edition: EditionId, entries: &[StandingsEntry]) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM standings_entries WHERE edition_id = ?1",
                params![edition.to_string()],
            )
            .context("failed to clear standings")?;
        let mut stmt = self
            .conn
            .prepare(
                "INSERT INTO standings_entries
                    (edition_id, team_id, position, wins, draws, losses, goals_for, goals_against)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .context("failed to prepare standings insert")?;
        for (position, e) in entries.iter().enumerate() {
            stmt.execute(params![
                edition.to_string(),
                e.team_id.to_string(),
                position as i64,
                e.wins,
                e.draws,
                e.losses,
                e.goals_for,
                e.goals_against,
            ])
            .context("failed to insert standings entry")?;
        }
        Ok(())
    }
}
