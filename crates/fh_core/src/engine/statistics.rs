//! Per-player and per-quarter aggregation over the event log.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::engine::clock::QUARTER_SECONDS;
use crate::models::{Goal, Penalty, Player, PlayerId, Substitution, Team};

/// One row of the individual-statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub player: Player,
    pub goals: u32,
    pub assists: u32,
    /// This player's penalties in log order.
    pub penalties: Vec<Penalty>,
}

impl PlayerStatLine {
    fn is_empty(&self) -> bool {
        self.goals == 0 && self.assists == 0 && self.penalties.is_empty()
    }
}

/// Fold the goal and penalty logs into per-player lines for one team.
///
/// Players with nothing to show are dropped. Rows sort by goals
/// descending, assists descending, then shirt number ascending.
pub fn team_player_statistics(
    team: &Team,
    goals: &[Goal],
    penalties: &[Penalty],
) -> Vec<PlayerStatLine> {
    let mut lines: Vec<PlayerStatLine> = team
        .players
        .iter()
        .map(|player| PlayerStatLine {
            player: player.clone(),
            goals: 0,
            assists: 0,
            penalties: Vec::new(),
        })
        .collect();
    let index: HashMap<PlayerId, usize> =
        team.players.iter().enumerate().map(|(i, p)| (p.id, i)).collect();

    for goal in goals.iter().filter(|g| g.team_name == team.name) {
        if let Some(&i) = index.get(&goal.scorer.id) {
            lines[i].goals += 1;
        }
        if let Some(assist) = &goal.assist {
            if let Some(&i) = index.get(&assist.id) {
                lines[i].assists += 1;
            }
        }
    }

    for penalty in penalties.iter().filter(|p| p.team_name == team.name) {
        if let Some(&i) = index.get(&penalty.player.id) {
            lines[i].penalties.push(penalty.clone());
        }
    }

    lines.retain(|line| !line.is_empty());
    lines.sort_by(|a, b| {
        b.goals
            .cmp(&a.goals)
            .then(b.assists.cmp(&a.assists))
            .then(a.player.number.cmp(&b.player.number))
    });
    lines
}

/// Cumulative score through the end of `quarter` (1-4): goals with
/// `time <= quarter * 900`.
pub fn score_through_quarter(team_name: &str, goals: &[Goal], quarter: u32) -> u32 {
    let cutoff = quarter * QUARTER_SECONDS;
    goals
        .iter()
        .filter(|g| g.team_name == team_name && g.time <= cutoff)
        .count() as u32
}

/// The four cumulative quarter columns of the scoresheet.
pub fn quarter_scores(team_name: &str, goals: &[Goal]) -> [u32; 4] {
    [1, 2, 3, 4].map(|q| score_through_quarter(team_name, goals, q))
}

pub fn substitution_count(team_name: &str, substitutions: &[Substitution]) -> u32 {
    substitutions.iter().filter(|s| s.team_name == team_name).count() as u32
}
