pub mod events;
pub mod player;
pub mod team;

pub use events::{Card, EventId, Goal, GoalType, MatchEvent, Penalty, Substitution};
pub use player::{Player, PlayerId};
pub use team::{Team, TeamSide};
