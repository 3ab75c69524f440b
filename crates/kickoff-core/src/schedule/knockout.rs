// Single-elimination bracket with simulated winners.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::{fixture_id, DecideWinner, Round, ScheduleConfig};
use crate::domain::{EditionId, Fixture, Team};
use crate::error::{EngineError, Result};

/// Build a full knockout bracket.
///
/// The team list is shuffled, then paired off `(0,1), (2,3), ...` each
/// round. A trailing unpaired team gets a bye into the next round. Winners
/// are chosen by `decider` so later rounds can be scheduled up front; the
/// fixtures themselves carry no result. A single team yields no rounds.
pub fn bracket<R, D>(
    rng: &mut R,
    config: &ScheduleConfig,
    edition: EditionId,
    teams: &[Team],
    base: DateTime<Utc>,
    decider: &mut D,
) -> Result<Vec<Round>>
where
    R: Rng + ?Sized,
    D: DecideWinner + ?Sized,
{
    if teams.is_empty() {
        return Err(EngineError::EmptyTeamList);
    }

    let mut alive: Vec<&Team> = teams.iter().collect();
    alive.shuffle(rng);

    let mut rounds = Vec::new();
    while alive.len() > 1 {
        let index = rounds.len() as u32;
        let kickoff = config.kickoff_for_round(base, index);
        let mut fixtures = Vec::with_capacity(alive.len() / 2);
        let mut next = Vec::with_capacity(alive.len().div_ceil(2));

        let mut pairs = alive.chunks_exact(2);
        for pair in pairs.by_ref() {
            let (home, away) = (pair[0], pair[1]);
            let winner = decider.decide_winner(home, away)?;
            fixtures.push(Fixture::scheduled(
                fixture_id(rng),
                edition,
                index,
                home.id,
                away.id,
                kickoff,
            ));
            next.push(winner);
        }
        if let [bye] = pairs.remainder() {
            debug!("{} gets a bye in round {}", bye.name, index);
            next.push(*bye);
        }

        rounds.push(Round {
            index,
            kickoff,
            fixtures,
        });
        alive = next;
    }
    Ok(rounds)
}
