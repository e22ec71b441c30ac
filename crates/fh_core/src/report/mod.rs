//! Printable match report.
//!
//! `MatchReport` is a flat, serializable projection of a finished (or
//! in-progress) match; `render_text` turns it into the fixed-width sheet
//! handed to officials. Rendering takes the report, not the live state,
//! so a frontend can also ship the projection elsewhere as JSON.

use serde::{Deserialize, Serialize};

use crate::engine::clock::format_clock;
use crate::models::{Card, MatchEvent, Team, TeamSide};
use crate::state::{MatchState, SortOrder};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Short match number: the tail of the match id.
    pub match_no: String,
    pub date: String,
    pub venue: String,
    pub home: TeamSheet,
    pub away: TeamSheet,
    /// Newest-first event timeline.
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub name: String,
    pub score: u32,
    /// Cumulative goals through Q1-Q4.
    pub quarter_scores: [u32; 4],
    pub substitutions: u32,
    /// One row per rostered player, roster order.
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    pub number: u32,
    pub name: String,
    pub goals: u32,
    /// Match minute of the first offence per card, as the sheet prints it.
    pub green_minute: Option<u32>,
    pub yellow_minute: Option<u32>,
    pub red_minute: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub clock: String,
    pub team_name: String,
    pub detail: String,
}

impl MatchReport {
    pub fn from_state(state: &MatchState) -> Self {
        let match_no: String = {
            let chars: Vec<char> = state.id.chars().collect();
            let tail = chars.len().saturating_sub(4);
            chars[tail..].iter().collect()
        };

        Self {
            match_no,
            date: state.date.to_string(),
            venue: state.venue.clone(),
            home: team_sheet(state, TeamSide::Home),
            away: team_sheet(state, TeamSide::Away),
            timeline: timeline(state),
        }
    }
}

fn team_sheet(state: &MatchState, side: TeamSide) -> TeamSheet {
    let team: &Team = state.team(side);
    let rows = team
        .players
        .iter()
        .map(|player| {
            let goals = state
                .goals()
                .iter()
                .filter(|g| g.team_name == team.name && g.scorer.id == player.id)
                .count() as u32;
            let card_minute = |card: Card| {
                state
                    .penalties()
                    .iter()
                    .find(|p| p.team_name == team.name && p.player.id == player.id && p.card == card)
                    .map(|p| p.time / 60)
            };
            SheetRow {
                number: player.number,
                name: player.name.clone(),
                goals,
                green_minute: card_minute(Card::Green),
                yellow_minute: card_minute(Card::Yellow),
                red_minute: card_minute(Card::Red),
            }
        })
        .collect();

    TeamSheet {
        name: team.name.clone(),
        score: state.score_for(side),
        quarter_scores: state.quarter_scores(side),
        substitutions: state.substitution_count(side),
        rows,
    }
}

fn timeline(state: &MatchState) -> Vec<TimelineEntry> {
    state
        .event_log(SortOrder::ReverseChronological)
        .iter()
        .map(|event| TimelineEntry {
            clock: format_clock(event.time()),
            team_name: event.team_name().to_string(),
            detail: describe(event),
        })
        .collect()
}

fn describe(event: &MatchEvent) -> String {
    match event {
        MatchEvent::Goal(g) => {
            let mut detail = format!("Goal ({}) by {}", g.kind.code(), g.scorer.display());
            if let Some(assist) = &g.assist {
                detail.push_str(&format!(", assist {}", assist.display()));
            }
            detail
        }
        MatchEvent::Penalty(p) => match p.duration {
            Some(minutes) => format!("{} for {}, {} min", p.card, p.player.display(), minutes),
            None => format!("{} for {}", p.card, p.player.display()),
        },
        MatchEvent::Substitution(s) => {
            format!("Substitution: {} on for {}", s.player_on.display(), s.player_off.display())
        }
    }
}

/// The fixed-width printable sheet. Lines carry no trailing whitespace.
pub fn render_text(report: &MatchReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("FIH INTERNATIONAL HOCKEY FEDERATION".to_string());
    lines.push("TOURNAMENT MATCH REPORT".to_string());
    lines.push(String::new());
    lines.push(format!("Match No: {}", report.match_no));
    lines.push(format!("Date: {}", report.date));
    lines.push(format!("Venue: {}", report.venue));
    lines.push(String::new());
    lines.push(format!(
        "RESULT  {} {} - {} {}",
        report.home.name, report.home.score, report.away.score, report.away.name
    ));
    lines.push(String::new());

    lines.push("Quarter scores (cumulative)".to_string());
    for sheet in [&report.home, &report.away] {
        let [q1, q2, q3, q4] = sheet.quarter_scores;
        lines.push(format!(
            "  {:<20} Q1 {:>2}  Q2 {:>2}  Q3 {:>2}  Q4 {:>2}",
            sheet.name, q1, q2, q3, q4
        ));
    }
    lines.push(String::new());

    for sheet in [&report.home, &report.away] {
        lines.push(format!("{}  (substitutions: {})", sheet.name, sheet.substitutions));
        lines.push(format!(
            "  {:>3} {:<20} {:>2} {:>3} {:>3} {:>3}",
            "No.", "Player", "G", "GC", "YC", "RC"
        ));
        for row in &sheet.rows {
            let cell = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();
            let goals = if row.goals > 0 { row.goals.to_string() } else { String::new() };
            let line = format!(
                "  {:>3} {:<20} {:>2} {:>3} {:>3} {:>3}",
                row.number,
                row.name,
                goals,
                cell(row.green_minute),
                cell(row.yellow_minute),
                cell(row.red_minute),
            );
            lines.push(line.trim_end().to_string());
        }
        lines.push(String::new());
    }

    lines.push("Timeline".to_string());
    for entry in &report.timeline {
        lines.push(format!("  {}  {}: {}", entry.clock, entry.team_name, entry.detail));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Card, GoalType};
    use chrono::NaiveDate;

    fn fixture() -> MatchState {
        let mut m = MatchState::start(
            "Falcons",
            "9 Alice\n4 Bella\nCara",
            "Ravens",
            "4 Dana\n7 Erin\nFay",
            "Main Pitch",
            NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
        )
        .unwrap();
        m.id = "demo-match-4242".to_string();

        m.add_goal(
            TeamSide::Home,
            0,
            GoalType::FieldGoal,
            Some(1),
            Some("Top of the D".to_string()),
            200,
        )
        .unwrap();
        m.add_penalty(TeamSide::Home, 1, Card::Green, Some(2), 100).unwrap();
        m.add_penalty(TeamSide::Away, 0, Card::Yellow, Some(5), 300).unwrap();
        m.add_substitution(TeamSide::Away, 1, 2, 400).unwrap();
        m.add_goal(TeamSide::Home, 2, GoalType::PenaltyCorner, None, None, 950).unwrap();
        m.add_goal(TeamSide::Away, 0, GoalType::FieldGoal, None, None, 2000).unwrap();
        m.end_match();
        m
    }

    #[test]
    fn projection_carries_sheet_facts() {
        let report = MatchReport::from_state(&fixture());
        assert_eq!(report.match_no, "4242");
        assert_eq!(report.home.score, 2);
        assert_eq!(report.away.score, 1);
        assert_eq!(report.home.quarter_scores, [1, 2, 2, 2]);
        assert_eq!(report.away.quarter_scores, [0, 0, 1, 1]);
        assert_eq!(report.away.substitutions, 1);

        // Bella: no goals, green card in the 1st minute.
        let bella = &report.home.rows[1];
        assert_eq!(bella.goals, 0);
        assert_eq!(bella.green_minute, Some(1));
        assert_eq!(bella.yellow_minute, None);

        // Dana: a goal and a yellow in the 5th minute.
        let dana = &report.away.rows[0];
        assert_eq!(dana.goals, 1);
        assert_eq!(dana.yellow_minute, Some(5));

        assert_eq!(report.timeline.len(), 6);
        assert_eq!(report.timeline[0].clock, "33:20");
    }

    #[test]
    fn rendered_sheet_is_stable() {
        let report = MatchReport::from_state(&fixture());
        insta::assert_snapshot!(render_text(&report), @r###"
FIH INTERNATIONAL HOCKEY FEDERATION
TOURNAMENT MATCH REPORT

Match No: 4242
Date: 2024-05-04
Venue: Main Pitch

RESULT  Falcons 2 - 1 Ravens

Quarter scores (cumulative)
  Falcons              Q1  1  Q2  2  Q3  2  Q4  2
  Ravens               Q1  0  Q2  0  Q3  1  Q4  1

Falcons  (substitutions: 0)
  No. Player                G  GC  YC  RC
    9 Alice                 1
    4 Bella                     1
    1 Cara                  1

Ravens  (substitutions: 1)
  No. Player                G  GC  YC  RC
    4 Dana                  1       5
    7 Erin
    1 Fay

Timeline
  33:20  Ravens: Goal (FG) by Dana (#4)
  15:50  Falcons: Goal (PC) by Cara (#1)
  06:40  Ravens: Substitution: Fay (#1) on for Erin (#7)
  05:00  Ravens: Yellow Card for Dana (#4), 5 min
  03:20  Falcons: Goal (FG) by Alice (#9), assist Bella (#4)
  01:40  Falcons: Green Card for Bella (#4), 2 min
"###);
    }

    #[test]
    fn report_roundtrips_as_json() {
        let report = MatchReport::from_state(&fixture());
        let json = serde_json::to_string(&report).unwrap();
        let back: MatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
