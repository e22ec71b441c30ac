//! Match clock and period state.
//!
//! Periods run strictly `Q1 -> Q2 -> HT -> Q3 -> Q4 -> FT`. Entering a
//! period snaps the clock to that period's anchor; FT leaves the clock
//! where it is. The running flag is orthogonal to the period.

use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MatchError, Result};

pub const QUARTER_SECONDS: u32 = 15 * 60;
pub const MATCH_SECONDS: u32 = 4 * QUARTER_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum MatchPeriod {
    Q1,
    Q2,
    #[serde(rename = "HT")]
    Ht,
    Q3,
    Q4,
    #[serde(rename = "FT")]
    Ft,
}

impl MatchPeriod {
    pub fn next(self) -> Option<Self> {
        match self {
            MatchPeriod::Q1 => Some(MatchPeriod::Q2),
            MatchPeriod::Q2 => Some(MatchPeriod::Ht),
            MatchPeriod::Ht => Some(MatchPeriod::Q3),
            MatchPeriod::Q3 => Some(MatchPeriod::Q4),
            MatchPeriod::Q4 => Some(MatchPeriod::Ft),
            MatchPeriod::Ft => None,
        }
    }

    /// Clock anchor on entering this period. FT has none: full time keeps
    /// whatever the clock showed.
    pub fn anchor_seconds(self) -> Option<u32> {
        match self {
            MatchPeriod::Q1 => Some(0),
            MatchPeriod::Q2 => Some(QUARTER_SECONDS),
            MatchPeriod::Ht => Some(2 * QUARTER_SECONDS),
            MatchPeriod::Q3 => Some(2 * QUARTER_SECONDS),
            MatchPeriod::Q4 => Some(3 * QUARTER_SECONDS),
            MatchPeriod::Ft => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchPeriod::Q1 => "Q1",
            MatchPeriod::Q2 => "Q2",
            MatchPeriod::Ht => "HT",
            MatchPeriod::Q3 => "Q3",
            MatchPeriod::Q4 => "Q4",
            MatchPeriod::Ft => "FT",
        }
    }

    /// 1-based quarter number for the four playing periods.
    pub fn quarter_number(self) -> Option<u32> {
        match self {
            MatchPeriod::Q1 => Some(1),
            MatchPeriod::Q2 => Some(2),
            MatchPeriod::Q3 => Some(3),
            MatchPeriod::Q4 => Some(4),
            MatchPeriod::Ht | MatchPeriod::Ft => None,
        }
    }
}

impl fmt::Display for MatchPeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchClock {
    seconds: u32,
    period: MatchPeriod,
    running: bool,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchClock {
    pub fn new() -> Self {
        Self { seconds: 0, period: MatchPeriod::Q1, running: false }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn period(&self) -> MatchPeriod {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by one second if running. Returns whether time moved.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.seconds += 1;
            true
        } else {
            false
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Manual override; does not touch the period.
    pub fn set_seconds(&mut self, seconds: u32) {
        self.seconds = seconds;
    }

    /// Jump to a period, snapping the clock to its anchor.
    pub fn set_period(&mut self, period: MatchPeriod) {
        if let Some(anchor) = period.anchor_seconds() {
            self.seconds = anchor;
        }
        if period != self.period {
            info!("period {} -> {}", self.period, period);
        }
        self.period = period;
    }

    /// Move to the next period, if there is one.
    pub fn advance(&mut self) -> Option<MatchPeriod> {
        let next = self.period.next()?;
        self.set_period(next);
        Some(next)
    }

    /// Human display line, e.g. "Quarter 2 - 03:15" or "Half Time".
    pub fn display(&self) -> String {
        match self.period.quarter_number() {
            Some(quarter) => {
                let start = (quarter - 1) * QUARTER_SECONDS;
                let in_quarter = self.seconds.saturating_sub(start);
                format!("Quarter {} - {}", quarter, format_clock(in_quarter))
            }
            None if self.period == MatchPeriod::Ht => "Half Time".to_string(),
            None => "Full Time".to_string(),
        }
    }
}

/// "MM:SS" rendering of a second count; minutes may exceed 59.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Parse scorekeeper "MM:SS" input. Seconds must stay below 60.
pub fn parse_clock(text: &str) -> Result<u32> {
    let invalid = || MatchError::InvalidTime(text.to_string());
    let (minutes, seconds) = text.split_once(':').ok_or_else(invalid)?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;
    let seconds: u32 = seconds.trim().parse().map_err(|_| invalid())?;
    if seconds >= 60 {
        return Err(invalid());
    }
    Ok(minutes * 60 + seconds)
}
