use serde::{Deserialize, Serialize};

/// Roster-local identifier, assigned at parse time (0-based line index).
pub type PlayerId = u32;

/// A rostered player. Immutable once the roster is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Shirt number, unique within the team.
    pub number: u32,
}

impl Player {
    /// Display form used in logs and reports, e.g. "Jane Doe (#10)".
    pub fn display(&self) -> String {
        format!("{} (#{})", self.name, self.number)
    }
}
