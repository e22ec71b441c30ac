//! JSON boundary for the presentation layer.
//!
//! String-in/string-out functions over the active match, so a UI shell
//! (or anything else that can shuttle JSON) never links against the
//! model types directly. Errors come back as plain strings; the core
//! never panics across this boundary.

use serde::{Deserialize, Serialize};
use std::sync::RwLockWriteGuard;

use chrono::NaiveDate;

use crate::engine::clock::{parse_clock, MatchPeriod};
use crate::engine::statistics::PlayerStatLine;
use crate::engine::suspension::ActivePenalty;
use crate::error::MatchError;
use crate::models::{Card, EventId, GoalType, MatchEvent, PlayerId, TeamSide};
use crate::report::MatchReport;
use crate::state::{MatchPhase, MatchState, SortOrder, ACTIVE_MATCH};

#[derive(Debug, Deserialize)]
pub struct StartMatchRequest {
    pub home_name: String,
    /// Roster text block, one player per line.
    pub home_players: String,
    pub away_name: String,
    pub away_players: String,
    pub venue: String,
    pub date: NaiveDate,
}

/// A new event, addressed by team name and roster player ids. `time`
/// defaults to the current clock.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventRequest {
    Goal {
        team: String,
        scorer: PlayerId,
        #[serde(rename = "type")]
        kind: GoalType,
        #[serde(default)]
        assist: Option<PlayerId>,
        #[serde(default)]
        location: Option<String>,
        #[serde(default)]
        time: Option<u32>,
    },
    Penalty {
        team: String,
        player: PlayerId,
        card: Card,
        #[serde(default)]
        duration: Option<u32>,
        #[serde(default)]
        time: Option<u32>,
    },
    Substitution {
        team: String,
        player_off: PlayerId,
        player_on: PlayerId,
        #[serde(default)]
        time: Option<u32>,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct ClockRequest {
    /// "MM:SS" override.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub period: Option<MatchPeriod>,
    #[serde(default)]
    pub running: Option<bool>,
}

/// Scoreboard-sized view of the match, returned by every mutation.
#[derive(Debug, Serialize)]
pub struct MatchSnapshot {
    pub id: String,
    pub venue: String,
    pub date: String,
    pub phase: MatchPhase,
    pub period: MatchPeriod,
    pub period_display: String,
    pub seconds: u32,
    pub running: bool,
    pub score_home: u32,
    pub score_away: u32,
    pub active_suspensions: Vec<ActivePenalty>,
}

impl MatchSnapshot {
    fn of(state: &MatchState) -> Self {
        let (score_home, score_away) = state.score();
        Self {
            id: state.id.clone(),
            venue: state.venue.clone(),
            date: state.date.to_string(),
            phase: state.phase(),
            period: state.clock().period(),
            period_display: state.clock().display(),
            seconds: state.clock().seconds(),
            running: state.clock().is_running(),
            score_home,
            score_away,
            active_suspensions: state.active_suspensions(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub event_id: EventId,
    pub snapshot: MatchSnapshot,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub snapshot: MatchSnapshot,
    pub home_statistics: Vec<PlayerStatLine>,
    pub away_statistics: Vec<PlayerStatLine>,
    pub home_quarter_scores: [u32; 4],
    pub away_quarter_scores: [u32; 4],
    pub events: Vec<MatchEvent>,
    pub report: MatchReport,
}

/// Parse the setup form and install a fresh match as the active one.
pub fn start_match_json(request_json: &str) -> Result<String, String> {
    let request: StartMatchRequest = parse_request(request_json)?;
    let state = MatchState::start(
        &request.home_name,
        &request.home_players,
        &request.away_name,
        &request.away_players,
        &request.venue,
        request.date,
    )
    .map_err(err_string)?;
    let snapshot = MatchSnapshot::of(&state);
    *lock_active()? = Some(state);
    to_json(&snapshot)
}

/// Record a new event against the active match.
pub fn add_event_json(request_json: &str) -> Result<String, String> {
    let request: EventRequest = parse_request(request_json)?;
    let mut slot = lock_active()?;
    let state = active_mut(&mut slot)?;
    let now = state.clock().seconds();

    let event_id = match request {
        EventRequest::Goal { team, scorer, kind, assist, location, time } => {
            let side = state.side_of(&team).map_err(err_string)?;
            state
                .add_goal(side, scorer, kind, assist, location, time.unwrap_or(now))
                .map_err(err_string)?
        }
        EventRequest::Penalty { team, player, card, duration, time } => {
            let side = state.side_of(&team).map_err(err_string)?;
            state.add_penalty(side, player, card, duration, time.unwrap_or(now)).map_err(err_string)?
        }
        EventRequest::Substitution { team, player_off, player_on, time } => {
            let side = state.side_of(&team).map_err(err_string)?;
            state
                .add_substitution(side, player_off, player_on, time.unwrap_or(now))
                .map_err(err_string)?
        }
    };

    to_json(&EventResponse { event_id, snapshot: MatchSnapshot::of(state) })
}

/// Replace an existing event. The payload is a full tagged event; id and
/// team are taken from the stored one.
pub fn update_event_json(request_json: &str) -> Result<String, String> {
    let event: MatchEvent = parse_request(request_json)?;
    let mut slot = lock_active()?;
    let state = active_mut(&mut slot)?;
    state.update_event(event).map_err(err_string)?;
    to_json(&MatchSnapshot::of(state))
}

pub fn delete_event_json(event_id: EventId) -> Result<String, String> {
    let mut slot = lock_active()?;
    let state = active_mut(&mut slot)?;
    state.delete_event(event_id).map_err(err_string)?;
    to_json(&MatchSnapshot::of(state))
}

/// Apply clock overrides: "MM:SS" time, a period jump, the running flag.
pub fn set_clock_json(request_json: &str) -> Result<String, String> {
    let request: ClockRequest = parse_request(request_json)?;
    let mut slot = lock_active()?;
    let state = active_mut(&mut slot)?;

    if let Some(text) = &request.time {
        let seconds = parse_clock(text).map_err(err_string)?;
        state.set_time(seconds).map_err(err_string)?;
    }
    if let Some(period) = request.period {
        state.set_period(period).map_err(err_string)?;
    }
    match request.running {
        Some(true) => state.start_clock().map_err(err_string)?,
        Some(false) => state.stop_clock(),
        None => {}
    }

    to_json(&MatchSnapshot::of(state))
}

pub fn advance_period_json() -> Result<String, String> {
    let mut slot = lock_active()?;
    let state = active_mut(&mut slot)?;
    state.advance_period();
    to_json(&MatchSnapshot::of(state))
}

pub fn end_match_json() -> Result<String, String> {
    let mut slot = lock_active()?;
    let state = active_mut(&mut slot)?;
    state.end_match();
    to_json(&MatchSnapshot::of(state))
}

pub fn event_log_json(order: SortOrder) -> Result<String, String> {
    let slot = ACTIVE_MATCH.read().map_err(|_| "match state lock poisoned".to_string())?;
    let state = slot.as_ref().ok_or_else(no_active)?;
    to_json(&state.event_log(order))
}

/// Everything a summary or report screen needs in one payload.
pub fn match_summary_json() -> Result<String, String> {
    let slot = ACTIVE_MATCH.read().map_err(|_| "match state lock poisoned".to_string())?;
    let state = slot.as_ref().ok_or_else(no_active)?;
    let response = SummaryResponse {
        snapshot: MatchSnapshot::of(state),
        home_statistics: state.player_statistics(TeamSide::Home),
        away_statistics: state.player_statistics(TeamSide::Away),
        home_quarter_scores: state.quarter_scores(TeamSide::Home),
        away_quarter_scores: state.quarter_scores(TeamSide::Away),
        events: state.event_log(SortOrder::ReverseChronological),
        report: MatchReport::from_state(state),
    };
    to_json(&response)
}

fn parse_request<'a, T: Deserialize<'a>>(request_json: &'a str) -> Result<T, String> {
    serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn err_string(err: MatchError) -> String {
    err.to_string()
}

fn no_active() -> String {
    "no active match".to_string()
}

fn lock_active() -> Result<RwLockWriteGuard<'static, Option<MatchState>>, String> {
    ACTIVE_MATCH.write().map_err(|_| "match state lock poisoned".to_string())
}

fn active_mut<'a>(
    slot: &'a mut RwLockWriteGuard<'static, Option<MatchState>>,
) -> Result<&'a mut MatchState, String> {
    slot.as_mut().ok_or_else(no_active)
}
