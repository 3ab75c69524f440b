// Domain values handed to the engine by the orchestration layer.

pub mod edition;
pub mod fixture;
pub mod roster;
pub mod team;

pub use edition::{Competition, CompetitionId, Edition, EditionId, Strategy};
pub use fixture::{Fixture, MatchEvent, MatchEventKind, MatchId, MatchStatus};
pub use roster::{Contract, Player, PlayerId, PositionGroup, RosterPlayer, TeamRoster};
pub use team::{Team, TeamId};
