use serde::{Deserialize, Serialize};
use std::fmt;

use super::player::Player;

/// Event identifier, unique across the whole match regardless of kind.
pub type EventId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum GoalType {
    #[serde(rename = "FG")]
    FieldGoal,
    #[serde(rename = "PC")]
    PenaltyCorner,
    #[serde(rename = "PS")]
    PenaltyStroke,
}

impl GoalType {
    /// Scoresheet abbreviation.
    pub fn code(self) -> &'static str {
        match self {
            GoalType::FieldGoal => "FG",
            GoalType::PenaltyCorner => "PC",
            GoalType::PenaltyStroke => "PS",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GoalType::FieldGoal => "field goal",
            GoalType::PenaltyCorner => "penalty corner",
            GoalType::PenaltyStroke => "penalty stroke",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Card {
    #[serde(rename = "GREEN_CARD")]
    Green,
    #[serde(rename = "YELLOW_CARD")]
    Yellow,
    #[serde(rename = "RED_CARD")]
    Red,
}

impl Card {
    /// Whether `minutes` is a legal suspension duration for this card.
    ///
    /// Green carries exactly 2 minutes, yellow 5 or 10, red none at all
    /// (permanent dismissal has no suspension window).
    pub fn duration_valid(self, minutes: Option<u32>) -> bool {
        match self {
            Card::Green => minutes == Some(2),
            Card::Yellow => matches!(minutes, Some(5) | Some(10)),
            Card::Red => minutes.is_none(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Card::Green => "Green Card",
            Card::Yellow => "Yellow Card",
            Card::Red => "Red Card",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: EventId,
    pub team_name: String,
    pub scorer: Player,
    /// Seconds from match start.
    pub time: u32,
    #[serde(rename = "type")]
    pub kind: GoalType,
    /// Only meaningful for field goals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<Player>,
    /// Pitch zone label, e.g. "Top of the D".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub id: EventId,
    pub team_name: String,
    pub player: Player,
    pub card: Card,
    /// Seconds from match start.
    pub time: u32,
    /// Suspension duration in minutes; absent for red cards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Penalty {
    /// Match time at which the suspension ends, if the card carries one.
    pub fn end_time(&self) -> Option<u32> {
        self.duration.map(|minutes| self.time + minutes * 60)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    pub id: EventId,
    pub team_name: String,
    pub player_off: Player,
    pub player_on: Player,
    /// Seconds from match start.
    pub time: u32,
}

/// A recorded match event.
///
/// The kind is an explicit tag; nothing downstream infers it from which
/// fields happen to be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchEvent {
    Goal(Goal),
    Penalty(Penalty),
    Substitution(Substitution),
}

impl MatchEvent {
    pub fn id(&self) -> EventId {
        match self {
            MatchEvent::Goal(g) => g.id,
            MatchEvent::Penalty(p) => p.id,
            MatchEvent::Substitution(s) => s.id,
        }
    }

    pub fn time(&self) -> u32 {
        match self {
            MatchEvent::Goal(g) => g.time,
            MatchEvent::Penalty(p) => p.time,
            MatchEvent::Substitution(s) => s.time,
        }
    }

    pub fn team_name(&self) -> &str {
        match self {
            MatchEvent::Goal(g) => &g.team_name,
            MatchEvent::Penalty(p) => &p.team_name,
            MatchEvent::Substitution(s) => &s.team_name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            MatchEvent::Goal(_) => "goal",
            MatchEvent::Penalty(_) => "penalty",
            MatchEvent::Substitution(_) => "substitution",
        }
    }
}
