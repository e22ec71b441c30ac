use std::fmt;

use crate::models::{Card, EventId, GoalType};
use crate::roster::RosterError;

/// Everything the core can reject. All variants are recoverable: the
/// offending operation is refused and match state is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    MissingField(&'static str),
    DuplicateTeamName(String),
    UnknownTeam(String),
    PlayerNotOnRoster { team: String, player: String },
    SelfSubstitution,
    ScorerIsAssist,
    AssistNotAllowed(GoalType),
    InvalidCardDuration { card: Card, minutes: Option<u32> },
    UnknownEvent(EventId),
    EventKindMismatch(EventId),
    InvalidTime(String),
    MatchFinished,
    Roster(RosterError),
    SerializationError(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchError::MissingField(field) => {
                write!(f, "Missing required field: {}", field)
            }
            MatchError::DuplicateTeamName(name) => {
                write!(f, "Both teams are named {}", name)
            }
            MatchError::UnknownTeam(name) => {
                write!(f, "Unknown team: {}", name)
            }
            MatchError::PlayerNotOnRoster { team, player } => {
                write!(f, "Player {} is not on the roster of {}", player, team)
            }
            MatchError::SelfSubstitution => {
                write!(f, "Player cannot substitute themselves")
            }
            MatchError::ScorerIsAssist => {
                write!(f, "Scorer cannot also be credited with the assist")
            }
            MatchError::AssistNotAllowed(kind) => {
                write!(f, "Assists only apply to field goals, not to a {}", kind)
            }
            MatchError::InvalidCardDuration { card, minutes } => match minutes {
                Some(m) => write!(f, "Invalid suspension duration {} min for {}", m, card),
                None => write!(f, "{} requires a suspension duration", card),
            },
            MatchError::UnknownEvent(id) => {
                write!(f, "No event with id {}", id)
            }
            MatchError::EventKindMismatch(id) => {
                write!(f, "Event {} exists but has a different kind", id)
            }
            MatchError::InvalidTime(text) => {
                write!(f, "Invalid time format: {} (expected MM:SS)", text)
            }
            MatchError::MatchFinished => {
                write!(f, "Match has already finished")
            }
            MatchError::Roster(err) => {
                write!(f, "Roster error: {}", err)
            }
            MatchError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for MatchError {}

impl From<RosterError> for MatchError {
    fn from(err: RosterError) -> Self {
        MatchError::Roster(err)
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(err: serde_json::Error) -> Self {
        MatchError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
