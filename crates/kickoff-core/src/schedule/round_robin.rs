// Round-robin formats via the circle method.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::{fixture_id, Round, ScheduleConfig};
use crate::domain::{EditionId, Fixture, Strategy, Team};
use crate::error::{EngineError, Result};

fn check_team_count(strategy: Strategy, teams: &[Team]) -> Result<()> {
    let count = teams.len();
    if count == 0 || count % 2 != 0 {
        return Err(EngineError::InvalidTeamCount { strategy, count });
    }
    Ok(())
}

/// Pairings for every round of a single round-robin, as (home, away) slices
/// into the original team list.
///
/// Position 0 stays fixed. Each round pairs slot `i` with slot `n-1-i`, then
/// the last team moves to slot 1.
fn circle_pairings(teams: &[Team]) -> Vec<Vec<(&Team, &Team)>> {
    let n = teams.len();
    let mut order: Vec<&Team> = teams.iter().collect();
    let mut rounds = Vec::with_capacity(n.saturating_sub(1));

    for _ in 0..n.saturating_sub(1) {
        let mut pairs = Vec::with_capacity(n / 2);
        for i in 0..n / 2 {
            pairs.push((order[i], order[n - 1 - i]));
        }
        rounds.push(pairs);

        if let Some(last) = order.pop() {
            order.insert(1, last);
        }
    }
    rounds
}

/// Single round-robin: N-1 rounds of N/2 fixtures, every pair meeting once.
pub fn single<R: Rng + ?Sized>(
    rng: &mut R,
    config: &ScheduleConfig,
    edition: EditionId,
    teams: &[Team],
    base: DateTime<Utc>,
) -> Result<Vec<Round>> {
    check_team_count(Strategy::RoundRobin, teams)?;
    Ok(build_rounds(rng, config, edition, teams, base, false))
}

/// Double round-robin: the single round-robin followed by a mirrored second
/// leg with home and away swapped. Second-leg fixtures get fresh ids and
/// continue the weekly cadence.
pub fn double<R: Rng + ?Sized>(
    rng: &mut R,
    config: &ScheduleConfig,
    edition: EditionId,
    teams: &[Team],
    base: DateTime<Utc>,
) -> Result<Vec<Round>> {
    check_team_count(Strategy::RoundRobinDouble, teams)?;
    Ok(build_rounds(rng, config, edition, teams, base, true))
}

fn build_rounds<R: Rng + ?Sized>(
    rng: &mut R,
    config: &ScheduleConfig,
    edition: EditionId,
    teams: &[Team],
    base: DateTime<Utc>,
    with_return_leg: bool,
) -> Vec<Round> {
    let first_leg = circle_pairings(teams);
    let leg_len = first_leg.len() as u32;
    let mut rounds = Vec::new();

    for (offset, swap) in [(0, false), (leg_len, true)] {
        if swap && !with_return_leg {
            break;
        }
        for (i, pairs) in first_leg.iter().enumerate() {
            let index = offset + i as u32;
            let kickoff = config.kickoff_for_round(base, index);
            let fixtures = pairs
                .iter()
                .map(|&(a, b)| {
                    let (home, away) = if swap { (b, a) } else { (a, b) };
                    Fixture::scheduled(fixture_id(rng), edition, index, home.id, away.id, kickoff)
                })
                .collect();
            rounds.push(Round {
                index,
                kickoff,
                fixtures,
            });
        }
    }
    rounds
}
