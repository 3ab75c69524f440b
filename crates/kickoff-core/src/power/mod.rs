// Team strength heuristics and the knockout outcome decider built on them.

pub mod decider;
pub mod scorer;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::TeamId;
use crate::error::Result;
use crate::store::RosterSource;

pub use decider::OutcomeDecider;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Normalization constants for the sub-scores.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PowerConfig {
    /// Total yearly salary that maps to a financial score of 100.
    pub salary_cap: u64,
    pub ideal_age: f64,
    /// Average tenure (months) that maps to a cohesion score of 100.
    pub ideal_cohesion_months: f64,
    pub ideal_squad_size: u32,
    pub weights: PowerWeights,
}

impl Default for PowerConfig {
    fn default() -> Self {
        PowerConfig {
            salary_cap: 200_000_000,
            ideal_age: 27.0,
            ideal_cohesion_months: 36.0,
            ideal_squad_size: 25,
            weights: PowerWeights::default(),
        }
    }
}

/// Composite weights. Validated by the config loader to sum to 1.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PowerWeights {
    pub financial: f64,
    pub tactical: f64,
    pub age_fit: f64,
    pub cohesion: f64,
    pub depth: f64,
}

impl Default for PowerWeights {
    fn default() -> Self {
        PowerWeights {
            financial: 0.30,
            tactical: 0.25,
            age_fit: 0.15,
            cohesion: 0.15,
            depth: 0.15,
        }
    }
}

impl PowerWeights {
    pub fn sum(&self) -> f64 {
        self.financial + self.tactical + self.age_fit + self.cohesion + self.depth
    }
}

// ---------------------------------------------------------------------------
// Criteria and breakdown
// ---------------------------------------------------------------------------

/// One of the six ways two teams can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PowerCriterion {
    Composite,
    Financial,
    AgeFit,
    Cohesion,
    Tactical,
    Depth,
}

impl PowerCriterion {
    pub const ALL: [PowerCriterion; 6] = [
        PowerCriterion::Composite,
        PowerCriterion::Financial,
        PowerCriterion::AgeFit,
        PowerCriterion::Cohesion,
        PowerCriterion::Tactical,
        PowerCriterion::Depth,
    ];
}

/// All sub-scores of one team, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PowerBreakdown {
    pub financial: f64,
    pub age_fit: f64,
    pub cohesion: f64,
    pub tactical: f64,
    pub depth: f64,
    pub composite: f64,
}

impl PowerBreakdown {
    pub fn get(&self, criterion: PowerCriterion) -> f64 {
        match criterion {
            PowerCriterion::Composite => self.composite,
            PowerCriterion::Financial => self.financial,
            PowerCriterion::AgeFit => self.age_fit,
            PowerCriterion::Cohesion => self.cohesion,
            PowerCriterion::Tactical => self.tactical,
            PowerCriterion::Depth => self.depth,
        }
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Scores teams from roster and contract data fetched through `source`.
/// Missing data never errors; it just scores 0.
pub struct TeamPowerScorer<'a, S: ?Sized> {
    source: &'a S,
    config: &'a PowerConfig,
    today: NaiveDate,
}

impl<'a, S: RosterSource + ?Sized> TeamPowerScorer<'a, S> {
    pub fn new(source: &'a S, config: &'a PowerConfig, today: NaiveDate) -> Self {
        TeamPowerScorer {
            source,
            config,
            today,
        }
    }

    pub fn score_team(&self, team: TeamId) -> Result<PowerBreakdown> {
        let roster = self.source.roster(team)?;
        Ok(scorer::breakdown(&roster, self.config, self.today))
    }

    /// A single criterion, computing only what it needs.
    pub fn score(&self, team: TeamId, criterion: PowerCriterion) -> Result<f64> {
        let roster = self.source.roster(team)?;
        Ok(scorer::criterion_score(
            &roster,
            criterion,
            self.config,
            self.today,
        ))
    }
}
