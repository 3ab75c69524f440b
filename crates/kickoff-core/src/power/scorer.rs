// Sub-score formulas. Pure functions over a roster snapshot.

use chrono::{Datelike, NaiveDate};

use super::{PowerBreakdown, PowerConfig, PowerCriterion};
use crate::domain::{PositionGroup, TeamRoster};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Whole years between `born` and `today`.
pub fn age_in_years(born: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    years
}

/// Whole 30-day periods between `start` and `today`, in either direction.
pub fn tenure_months(start: NaiveDate, today: NaiveDate) -> i64 {
    (today - start).num_days().abs() / 30
}

fn clamp_score(x: f64) -> f64 {
    x.clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

/// Sum of each player's latest contract salary against the salary cap.
pub fn financial_score(roster: &TeamRoster, config: &PowerConfig) -> f64 {
    let total: u64 = roster
        .players
        .iter()
        .filter_map(|rp| rp.latest_contract())
        .map(|c| c.salary_per_year)
        .sum();
    if total == 0 || config.salary_cap == 0 {
        return 0.0;
    }
    clamp_score(total as f64 / config.salary_cap as f64 * 100.0)
}

/// Closeness of the average age (players with a birth date) to the ideal.
/// Loses 5 points per year of distance.
pub fn age_fit_score(roster: &TeamRoster, config: &PowerConfig, today: NaiveDate) -> f64 {
    let ages: Vec<i32> = roster
        .players
        .iter()
        .filter_map(|rp| rp.player.date_of_birth)
        .map(|dob| age_in_years(dob, today))
        .collect();
    if ages.is_empty() {
        return 0.0;
    }
    let avg = ages.iter().map(|&a| f64::from(a)).sum::<f64>() / ages.len() as f64;
    clamp_score(100.0 - 5.0 * (avg - config.ideal_age).abs())
}

/// Average tenure of the most recent contract against the ideal tenure.
pub fn cohesion_score(roster: &TeamRoster, config: &PowerConfig, today: NaiveDate) -> f64 {
    let months: Vec<i64> = roster
        .players
        .iter()
        .filter_map(|rp| rp.latest_contract())
        .map(|c| tenure_months(c.start_date, today))
        .collect();
    if months.is_empty() || config.ideal_cohesion_months <= 0.0 {
        return 0.0;
    }
    let avg = months.iter().sum::<i64>() as f64 / months.len() as f64;
    clamp_score(avg / config.ideal_cohesion_months * 100.0)
}

/// Position coverage. Starts at 100 and loses points for thin lines.
pub fn tactical_score(roster: &TeamRoster) -> f64 {
    if roster.is_empty() {
        return 0.0;
    }
    let gk = roster.count_in(PositionGroup::Goalkeeper);
    let def = roster.count_in(PositionGroup::Defender);
    let mid = roster.count_in(PositionGroup::Midfielder);
    let fwd = roster.count_in(PositionGroup::Forward);

    let mut score = 100.0;
    if gk < 1 {
        score -= 60.0;
    } else if gk < 2 {
        score -= 10.0;
    }
    if def < 3 {
        score -= 30.0;
    }
    if mid < 3 {
        score -= 20.0;
    }
    if fwd < 1 {
        score -= 20.0;
    }
    clamp_score(score)
}

/// Squad size against the ideal. Loses 4 points per player of distance.
pub fn depth_score(roster: &TeamRoster, config: &PowerConfig) -> f64 {
    let distance = (roster.len() as f64 - f64::from(config.ideal_squad_size)).abs();
    clamp_score(100.0 - 4.0 * distance)
}

/// Weighted blend of the five sub-scores, capped at 100.
pub fn composite(b: &PowerBreakdown, config: &PowerConfig) -> f64 {
    let w = &config.weights;
    let total = w.financial * b.financial
        + w.tactical * b.tactical
        + w.age_fit * b.age_fit
        + w.cohesion * b.cohesion
        + w.depth * b.depth;
    clamp_score(total)
}

pub fn breakdown(roster: &TeamRoster, config: &PowerConfig, today: NaiveDate) -> PowerBreakdown {
    let mut b = PowerBreakdown {
        financial: financial_score(roster, config),
        age_fit: age_fit_score(roster, config, today),
        cohesion: cohesion_score(roster, config, today),
        tactical: tactical_score(roster),
        depth: depth_score(roster, config),
        composite: 0.0,
    };
    b.composite = composite(&b, config);
    b
}

pub fn criterion_score(
    roster: &TeamRoster,
    criterion: PowerCriterion,
    config: &PowerConfig,
    today: NaiveDate,
) -> f64 {
    match criterion {
        PowerCriterion::Composite => breakdown(roster, config, today).composite,
        PowerCriterion::Financial => financial_score(roster, config),
        PowerCriterion::AgeFit => age_fit_score(roster, config, today),
        PowerCriterion::Cohesion => cohesion_score(roster, config, today),
        PowerCriterion::Tactical => tactical_score(roster),
        PowerCriterion::Depth => depth_score(roster, config),
    }
}
