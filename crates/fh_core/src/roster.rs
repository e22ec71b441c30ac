//! Roster text parsing.
//!
//! The setup form hands the core one roster per team as plain text, one
//! player per line: either `"<number> <name>"` or a bare `"<name>"`. Bare
//! names receive the lowest shirt number not claimed by an explicit number
//! anywhere in the same roster, assigned in the order encountered.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{Player, PlayerId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster has no players")]
    Empty,

    #[error("duplicate shirt number {number}")]
    DuplicateNumber { number: u32 },

    #[error("shirt number 0 is not allowed for {name}")]
    NumberZero { name: String },
}

/// Parse a roster text block into players.
///
/// Player ids are the 0-based index of the (non-blank) line, so ids are
/// stable as long as the text is.
pub fn parse_roster(text: &str) -> Result<Vec<Player>, RosterError> {
    let lines: Vec<(String, Option<u32>)> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(split_line)
        .collect();

    if lines.is_empty() {
        return Err(RosterError::Empty);
    }

    let mut claimed: HashSet<u32> = HashSet::new();
    for (name, number) in &lines {
        if let Some(n) = *number {
            if n == 0 {
                return Err(RosterError::NumberZero { name: name.clone() });
            }
            if !claimed.insert(n) {
                return Err(RosterError::DuplicateNumber { number: n });
            }
        }
    }

    let mut next_free = 1u32;
    let players = lines
        .into_iter()
        .enumerate()
        .map(|(index, (name, number))| {
            let number = number.unwrap_or_else(|| {
                while claimed.contains(&next_free) {
                    next_free += 1;
                }
                let assigned = next_free;
                next_free += 1;
                assigned
            });
            Player { id: index as PlayerId, name, number }
        })
        .collect();

    Ok(players)
}

/// Split one trimmed line into `(name, explicit number)`.
///
/// A line counts as numbered only when it starts with an integer followed
/// by whitespace and a non-empty name; anything else is a bare name,
/// including a line that is nothing but digits.
fn split_line(line: &str) -> (String, Option<u32>) {
    if let Some((head, rest)) = line.split_once(char::is_whitespace) {
        if let Ok(number) = head.parse::<u32>() {
            let name = rest.trim();
            if !name.is_empty() {
                return (name.to_string(), Some(number));
            }
        }
    }
    (line.to_string(), None)
}
