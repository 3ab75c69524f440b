// Caller-visible errors raised by the engine.

use thiserror::Error;

use crate::domain::{MatchStatus, Strategy, TeamId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid team count for format {strategy}: {count} teams")]
    InvalidTeamCount { strategy: Strategy, count: usize },

    #[error("cannot build a knockout bracket from an empty team list")]
    EmptyTeamList,

    #[error("team {0} is listed more than once")]
    DuplicateTeam(TeamId),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid match status transition: {from} -> {to}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },

    #[error("invalid contract: {0}")]
    InvalidContract(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl EngineError {
    /// Shorthand for a `NotFound` error on an entity identified by `id`.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EngineError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
