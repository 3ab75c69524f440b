// Simulated knockout winners: compare two teams on one randomly drawn criterion.

use rand::Rng;
use tracing::debug;

use super::{PowerCriterion, TeamPowerScorer};
use crate::domain::Team;
use crate::error::Result;
use crate::schedule::DecideWinner;
use crate::store::RosterSource;

/// Draws one of the six criteria uniformly, scores both teams on it and
/// returns the higher. Exact ties go to a fair coin flip.
pub struct OutcomeDecider<'a, S: ?Sized, R> {
    scorer: TeamPowerScorer<'a, S>,
    rng: R,
}

impl<'a, S: RosterSource + ?Sized, R: Rng> OutcomeDecider<'a, S, R> {
    pub fn new(scorer: TeamPowerScorer<'a, S>, rng: R) -> Self {
        OutcomeDecider { scorer, rng }
    }
}

impl<S: RosterSource + ?Sized, R: Rng> DecideWinner for OutcomeDecider<'_, S, R> {
    fn decide_winner<'t>(&mut self, first: &'t Team, second: &'t Team) -> Result<&'t Team> {
        let criterion = PowerCriterion::ALL[self.rng.gen_range(0..PowerCriterion::ALL.len())];
        let a = self.scorer.score(first.id, criterion)?;
        let b = self.scorer.score(second.id, criterion)?;

        let winner = if a > b {
            first
        } else if b > a {
            second
        } else if self.rng.gen_bool(0.5) {
            first
        } else {
            second
        };
        debug!(
            "{} vs {} on {:?} ({:.1} - {:.1}): {} advances",
            first.name, second.name, criterion, a, b, winner.name
        );
        Ok(winner)
    }
}
