//! # fh_core - Field Hockey Match Scorekeeping Core
//!
//! In-memory match model and derived-state engine for scoring a single
//! field-hockey match: rosters, an editable event log (goals, penalty
//! cards, substitutions), the period/clock state machine, and the pure
//! derivations computed from the log on demand (score, active
//! suspensions, per-player statistics, quarter snapshots, the printable
//! match report).
//!
//! ## Design
//! - Derived values are never stored: the score is the count of goal
//!   events, suspensions are recomputed per query, so log edits can
//!   never leave a cached counter behind.
//! - Event kinds are an explicit tagged union ([`models::MatchEvent`]).
//! - The clock only moves through [`state::MatchState::tick`]; the
//!   autonomous 1 Hz driver lives in [`engine::ticker`] and is
//!   cancellable without a trailing tick.
//! - A presentation layer talks JSON through [`api`], mirroring the
//!   shape of the original scoreboard UI's callbacks.

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod roster;
pub mod state;

pub use engine::clock::{format_clock, parse_clock, MatchClock, MatchPeriod};
pub use engine::statistics::PlayerStatLine;
pub use engine::suspension::ActivePenalty;
pub use engine::ticker::MatchTicker;
pub use error::{MatchError, Result};
pub use models::{
    Card, EventId, Goal, GoalType, MatchEvent, Penalty, Player, PlayerId, Substitution, Team,
    TeamSide,
};
pub use report::{render_text, MatchReport};
pub use roster::{parse_roster, RosterError};
pub use state::{MatchPhase, MatchState, SharedMatch, SortOrder, ACTIVE_MATCH};
