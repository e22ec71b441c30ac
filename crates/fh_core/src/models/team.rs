use super::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// One side of the match. The roster is frozen when the match starts.
///
/// There is deliberately no `score` field here: the score is always the
/// count of goal events for the team, recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opposite(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

impl Team {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Team name must not be empty".to_string());
        }

        if self.players.is_empty() {
            return Err(format!("Team {} has no players", self.name));
        }

        // Shirt numbers must be unique; roster parsing already guarantees
        // this for parsed rosters, but teams can also be built directly.
        let mut numbers: Vec<u32> = self.players.iter().map(|p| p.number).collect();
        numbers.sort_unstable();
        if numbers.windows(2).any(|w| w[0] == w[1]) {
            return Err(format!("Team {} has duplicate shirt numbers", self.name));
        }

        Ok(())
    }

    pub fn player_by_id(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_by_number(&self, number: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.number == number)
    }

    pub fn has_player(&self, id: PlayerId) -> bool {
        self.player_by_id(id).is_some()
    }
}
