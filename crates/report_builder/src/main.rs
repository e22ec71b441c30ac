//! Match report CLI
//!
//! Renders the printable FIH-style sheet (and a quick stats summary)
//! from a match saved as JSON, and can write a sample match file so the
//! render path is drivable without the scoreboard UI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use fh_core::report::{render_text, MatchReport};
use fh_core::{format_clock, Card, GoalType, MatchState, TeamSide};

#[derive(Parser)]
#[command(name = "report_builder")]
#[command(about = "Render printable match reports from saved match JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the printable match report sheet
    Render {
        /// Input match JSON file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output text file path; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print final score and per-player statistics
    Summary {
        /// Input match JSON file path
        #[arg(long)]
        r#in: PathBuf,
    },

    /// Write a sample match JSON file
    Demo {
        /// Output match JSON file path
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { r#in, out } => {
            let state = load_match(&r#in)?;
            let text = render_text(&MatchReport::from_state(&state));
            match out {
                Some(path) => {
                    fs::write(&path, text)
                        .with_context(|| format!("writing report to {}", path.display()))?;
                    println!("Report written to {}", path.display());
                }
                None => print!("{}", text),
            }
        }
        Commands::Summary { r#in } => {
            let state = load_match(&r#in)?;
            print_summary(&state);
        }
        Commands::Demo { out } => {
            let state = demo_match()?;
            let json = serde_json::to_string_pretty(&state)?;
            fs::write(&out, json)
                .with_context(|| format!("writing demo match to {}", out.display()))?;
            println!("Demo match written to {}", out.display());
        }
    }

    Ok(())
}

fn load_match(path: &Path) -> Result<MatchState> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading match file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parsing match file {}", path.display()))
}

fn print_summary(state: &MatchState) {
    let (home, away) = state.score();
    println!("{} {} - {} {}", state.home().name, home, away, state.away().name);
    println!("{} at {}, {}", state.clock().display(), state.venue, state.date);

    for side in [TeamSide::Home, TeamSide::Away] {
        let team = state.team(side);
        println!();
        println!("{} (substitutions: {})", team.name, state.substitution_count(side));
        let lines = state.player_statistics(side);
        if lines.is_empty() {
            println!("  no individual statistics recorded");
            continue;
        }
        for line in lines {
            let cards: Vec<String> = line
                .penalties
                .iter()
                .map(|p| format!("{} {}", p.card, format_clock(p.time)))
                .collect();
            println!(
                "  #{:<3} {:<20} goals {}  assists {}  {}",
                line.player.number,
                line.player.name,
                line.goals,
                line.assists,
                cards.join(", ")
            );
        }
    }
}

/// A small sample match: a goal each way, a yellow card and a
/// substitution, played out to full time.
fn demo_match() -> Result<MatchState> {
    let mut state = MatchState::start(
        "Falcons",
        "9 Alice\n4 Bella\nCara",
        "Ravens",
        "4 Dana\n7 Erin\nFay",
        "Main Pitch",
        chrono::NaiveDate::from_ymd_opt(2024, 5, 4).context("valid demo date")?,
    )?;
    state.add_goal(TeamSide::Home, 0, GoalType::FieldGoal, Some(1), None, 200)?;
    state.add_penalty(TeamSide::Away, 0, Card::Yellow, Some(5), 300)?;
    state.add_substitution(TeamSide::Away, 1, 2, 700)?;
    state.add_goal(TeamSide::Away, 0, GoalType::PenaltyCorner, None, None, 1400)?;
    while state.advance_period() != fh_core::MatchPeriod::Ft {}
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn demo_match_roundtrips_through_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("match.json");

        let state = demo_match().unwrap();
        fs::write(&path, serde_json::to_string_pretty(&state).unwrap()).unwrap();

        let loaded = load_match(&path).unwrap();
        assert_eq!(loaded.score(), (1, 1));
        assert_eq!(loaded.clock().period(), fh_core::MatchPeriod::Ft);

        let text = render_text(&MatchReport::from_state(&loaded));
        assert!(text.contains("TOURNAMENT MATCH REPORT"));
        assert!(text.contains("RESULT  Falcons 1 - 1 Ravens"));
    }

    #[test]
    fn load_match_reports_bad_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not a match").unwrap();
        assert!(load_match(&path).is_err());
        assert!(load_match(&dir.path().join("missing.json")).is_err());
    }
}
