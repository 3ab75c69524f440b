// Schedule generation: turns an edition's team list into dated fixture rounds.

pub mod knockout;
pub mod round_robin;

use std::collections::HashSet;

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::Rng;
use serde::Deserialize;
use tracing::info;

use crate::domain::{EditionId, Fixture, MatchId, Strategy, Team};
use crate::error::{EngineError, Result};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Kickoff timing shared by every format.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Hours between "now" and the first round's kickoff, before rounding
    /// down to the hour.
    pub first_kickoff_offset_hours: i64,
    /// Days between consecutive rounds.
    pub round_interval_days: i64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            first_kickoff_offset_hours: 3,
            round_interval_days: 7,
        }
    }
}

impl ScheduleConfig {
    /// Kickoff of round 0: `now` plus the offset, truncated to the hour.
    pub fn first_kickoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let shifted = now + Duration::hours(self.first_kickoff_offset_hours);
        shifted
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(shifted)
    }

    /// Kickoff of the round with the given zero-based index.
    pub fn kickoff_for_round(&self, base: DateTime<Utc>, index: u32) -> DateTime<Utc> {
        base + Duration::days(self.round_interval_days * i64::from(index))
    }
}

// ---------------------------------------------------------------------------
// Rounds
// ---------------------------------------------------------------------------

/// One round of fixtures sharing a kickoff.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub index: u32,
    pub kickoff: DateTime<Utc>,
    pub fixtures: Vec<Fixture>,
}

/// Picks the winner of a simulated knockout tie.
pub trait DecideWinner {
    fn decide_winner<'t>(&mut self, first: &'t Team, second: &'t Team) -> Result<&'t Team>;
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Builds the fixture list for an edition. All randomness (bracket shuffle,
/// fixture identifiers) comes from the injected `rng`.
pub struct ScheduleGenerator<R> {
    rng: R,
    config: ScheduleConfig,
}

impl<R: Rng> ScheduleGenerator<R> {
    pub fn new(rng: R, config: ScheduleConfig) -> Self {
        ScheduleGenerator { rng, config }
    }

    /// Generate every round for `strategy`. The decider is consulted only
    /// for knockout brackets.
    ///
    /// Fails on a repeated team, on an odd or empty team list for the
    /// round-robin formats, and on an empty list for knockout.
    pub fn generate<D: DecideWinner + ?Sized>(
        &mut self,
        strategy: Strategy,
        edition: EditionId,
        teams: &[Team],
        now: DateTime<Utc>,
        decider: &mut D,
    ) -> Result<Vec<Round>> {
        let mut seen = HashSet::new();
        for team in teams {
            if !seen.insert(team.id) {
                return Err(EngineError::DuplicateTeam(team.id));
            }
        }

        let base = self.config.first_kickoff(now);
        let rounds = match strategy {
            Strategy::RoundRobin => {
                round_robin::single(&mut self.rng, &self.config, edition, teams, base)?
            }
            Strategy::RoundRobinDouble => {
                round_robin::double(&mut self.rng, &self.config, edition, teams, base)?
            }
            Strategy::Knockout => {
                knockout::bracket(&mut self.rng, &self.config, edition, teams, base, decider)?
            }
        };

        info!(
            "generated {} rounds ({} fixtures) for {} edition {}",
            rounds.len(),
            rounds.iter().map(|r| r.fixtures.len()).sum::<usize>(),
            strategy,
            edition
        );
        Ok(rounds)
    }
}

/// Fresh fixture identifier drawn from the schedule's random source.
pub(crate) fn fixture_id<R: Rng + ?Sized>(rng: &mut R) -> MatchId {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Flatten rounds into the fixture list that gets persisted.
pub fn into_fixtures(rounds: Vec<Round>) -> Vec<Fixture> {
    rounds.into_iter().flat_map(|r| r.fixtures).collect()
}
