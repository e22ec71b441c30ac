//! The match aggregate and its shared runtime handle.
//!
//! `MatchState` owns the rosters, the three event sequences, the clock and
//! the lifecycle phase. All mutations validate first and apply second, so
//! a rejected operation leaves the state exactly as it was. Derived values
//! (score, suspensions, statistics) are recomputed from the log on every
//! read; there are no cached counters to drift.

use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use log::{debug, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::clock::{MatchClock, MatchPeriod};
use crate::engine::statistics::{self, PlayerStatLine};
use crate::engine::suspension::{self, ActivePenalty};
use crate::error::{MatchError, Result};
use crate::models::{
    Card, EventId, Goal, GoalType, MatchEvent, Penalty, Player, PlayerId, Substitution, Team,
    TeamSide,
};
use crate::roster;

/// Handle shared between the ticker, the JSON API and any frontend.
/// `None` means no match has been started yet.
pub type SharedMatch = Arc<RwLock<Option<MatchState>>>;

/// The match currently being scored, consumed by the JSON API layer.
pub static ACTIVE_MATCH: Lazy<SharedMatch> = Lazy::new(|| Arc::new(RwLock::new(None)));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    InProgress,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Chronological,
    ReverseChronological,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub id: String,
    pub venue: String,
    pub date: NaiveDate,
    home: Team,
    away: Team,
    goals: Vec<Goal>,
    penalties: Vec<Penalty>,
    substitutions: Vec<Substitution>,
    clock: MatchClock,
    phase: MatchPhase,
    next_event_id: EventId,
}

impl MatchState {
    /// Create a match from the setup form: two roster text blocks, team
    /// names, venue and date. Rosters are frozen from here on.
    pub fn start(
        home_name: &str,
        home_roster: &str,
        away_name: &str,
        away_roster: &str,
        venue: &str,
        date: NaiveDate,
    ) -> Result<Self> {
        let home_name = home_name.trim();
        let away_name = away_name.trim();
        let venue = venue.trim();
        if home_name.is_empty() {
            return Err(MatchError::MissingField("home team name"));
        }
        if away_name.is_empty() {
            return Err(MatchError::MissingField("away team name"));
        }
        if venue.is_empty() {
            return Err(MatchError::MissingField("venue"));
        }
        if home_name == away_name {
            return Err(MatchError::DuplicateTeamName(home_name.to_string()));
        }

        let home = Team { name: home_name.to_string(), players: roster::parse_roster(home_roster)? };
        let away = Team { name: away_name.to_string(), players: roster::parse_roster(away_roster)? };

        let state = Self {
            id: Uuid::new_v4().to_string(),
            venue: venue.to_string(),
            date,
            home,
            away,
            goals: Vec::new(),
            penalties: Vec::new(),
            substitutions: Vec::new(),
            clock: MatchClock::new(),
            phase: MatchPhase::InProgress,
            next_event_id: 1,
        };
        info!("match {} started: {} vs {} at {}", state.id, home_name, away_name, venue);
        Ok(state)
    }

    // ========================
    // Accessors
    // ========================

    pub fn home(&self) -> &Team {
        &self.home
    }

    pub fn away(&self) -> &Team {
        &self.away
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    /// Resolve a team name back to a side.
    pub fn side_of(&self, team_name: &str) -> Result<TeamSide> {
        if team_name == self.home.name {
            Ok(TeamSide::Home)
        } else if team_name == self.away.name {
            Ok(TeamSide::Away)
        } else {
            Err(MatchError::UnknownTeam(team_name.to_string()))
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn penalties(&self) -> &[Penalty] {
        &self.penalties
    }

    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    // ========================
    // Event log
    // ========================

    pub fn add_goal(
        &mut self,
        side: TeamSide,
        scorer: PlayerId,
        kind: GoalType,
        assist: Option<PlayerId>,
        location: Option<String>,
        time: u32,
    ) -> Result<EventId> {
        self.ensure_in_progress()?;
        let (scorer, assist) = self.resolve_goal_players(side, scorer, assist, kind)?;
        let id = self.alloc_event_id();
        let team_name = self.team(side).name.clone();
        debug!("goal {} for {} by {} at {}s", id, team_name, scorer.display(), time);
        self.goals.push(Goal { id, team_name, scorer, time, kind, assist, location });
        Ok(id)
    }

    pub fn add_penalty(
        &mut self,
        side: TeamSide,
        player: PlayerId,
        card: Card,
        duration: Option<u32>,
        time: u32,
    ) -> Result<EventId> {
        self.ensure_in_progress()?;
        if !card.duration_valid(duration) {
            return Err(MatchError::InvalidCardDuration { card, minutes: duration });
        }
        let player = self.resolve_player(side, player)?;
        let id = self.alloc_event_id();
        let team_name = self.team(side).name.clone();
        debug!("{} {} for {} of {} at {}s", card, id, player.display(), team_name, time);
        self.penalties.push(Penalty { id, team_name, player, card, time, duration });
        Ok(id)
    }

    pub fn add_substitution(
        &mut self,
        side: TeamSide,
        player_off: PlayerId,
        player_on: PlayerId,
        time: u32,
    ) -> Result<EventId> {
        self.ensure_in_progress()?;
        if player_off == player_on {
            return Err(MatchError::SelfSubstitution);
        }
        let player_off = self.resolve_player(side, player_off)?;
        let player_on = self.resolve_player(side, player_on)?;
        let id = self.alloc_event_id();
        let team_name = self.team(side).name.clone();
        debug!(
            "substitution {} for {}: {} on, {} off",
            id,
            team_name,
            player_on.display(),
            player_off.display()
        );
        self.substitutions.push(Substitution { id, team_name, player_off, player_on, time });
        Ok(id)
    }

    /// Replace an existing event of the same kind, in place.
    ///
    /// The stored id and team are preserved; everything else comes from
    /// the replacement, revalidated against the owning team's roster.
    pub fn update_event(&mut self, event: MatchEvent) -> Result<()> {
        self.ensure_in_progress()?;
        match event {
            MatchEvent::Goal(goal) => self.update_goal(goal),
            MatchEvent::Penalty(penalty) => self.update_penalty(penalty),
            MatchEvent::Substitution(substitution) => self.update_substitution(substitution),
        }
    }

    fn update_goal(&mut self, incoming: Goal) -> Result<()> {
        let index = self
            .goals
            .iter()
            .position(|g| g.id == incoming.id)
            .ok_or_else(|| self.missing_event_error(incoming.id))?;
        let (id, team_name) = (self.goals[index].id, self.goals[index].team_name.clone());
        let side = self.side_of(&team_name)?;
        let (scorer, assist) = self.resolve_goal_players(
            side,
            incoming.scorer.id,
            incoming.assist.as_ref().map(|p| p.id),
            incoming.kind,
        )?;
        self.goals[index] = Goal {
            id,
            team_name,
            scorer,
            time: incoming.time,
            kind: incoming.kind,
            assist,
            location: incoming.location,
        };
        Ok(())
    }

    fn update_penalty(&mut self, incoming: Penalty) -> Result<()> {
        let index = self
            .penalties
            .iter()
            .position(|p| p.id == incoming.id)
            .ok_or_else(|| self.missing_event_error(incoming.id))?;
        if !incoming.card.duration_valid(incoming.duration) {
            return Err(MatchError::InvalidCardDuration {
                card: incoming.card,
                minutes: incoming.duration,
            });
        }
        let (id, team_name) = (self.penalties[index].id, self.penalties[index].team_name.clone());
        let side = self.side_of(&team_name)?;
        let player = self.resolve_player(side, incoming.player.id)?;
        self.penalties[index] = Penalty {
            id,
            team_name,
            player,
            card: incoming.card,
            time: incoming.time,
            duration: incoming.duration,
        };
        Ok(())
    }

    fn update_substitution(&mut self, incoming: Substitution) -> Result<()> {
        let index = self
            .substitutions
            .iter()
            .position(|s| s.id == incoming.id)
            .ok_or_else(|| self.missing_event_error(incoming.id))?;
        if incoming.player_off.id == incoming.player_on.id {
            return Err(MatchError::SelfSubstitution);
        }
        let (id, team_name) =
            (self.substitutions[index].id, self.substitutions[index].team_name.clone());
        let side = self.side_of(&team_name)?;
        let player_off = self.resolve_player(side, incoming.player_off.id)?;
        let player_on = self.resolve_player(side, incoming.player_on.id)?;
        self.substitutions[index] =
            Substitution { id, team_name, player_off, player_on, time: incoming.time };
        Ok(())
    }

    /// Remove the event with this id from whichever sequence holds it.
    pub fn delete_event(&mut self, id: EventId) -> Result<()> {
        self.ensure_in_progress()?;
        if let Some(i) = self.goals.iter().position(|g| g.id == id) {
            let goal = self.goals.remove(i);
            debug!("deleted goal {} of {}", id, goal.team_name);
            return Ok(());
        }
        if let Some(i) = self.penalties.iter().position(|p| p.id == id) {
            self.penalties.remove(i);
            debug!("deleted penalty {}", id);
            return Ok(());
        }
        if let Some(i) = self.substitutions.iter().position(|s| s.id == id) {
            self.substitutions.remove(i);
            debug!("deleted substitution {}", id);
            return Ok(());
        }
        Err(MatchError::UnknownEvent(id))
    }

    /// The whole log, sorted by event time for display. Insertion order is
    /// the tie-break either way.
    pub fn event_log(&self, order: SortOrder) -> Vec<MatchEvent> {
        let mut events: Vec<MatchEvent> = self
            .goals
            .iter()
            .cloned()
            .map(MatchEvent::Goal)
            .chain(self.penalties.iter().cloned().map(MatchEvent::Penalty))
            .chain(self.substitutions.iter().cloned().map(MatchEvent::Substitution))
            .collect();
        match order {
            SortOrder::Chronological => events.sort_by_key(|e| e.time()),
            SortOrder::ReverseChronological => events.sort_by(|a, b| b.time().cmp(&a.time())),
        }
        events
    }

    // ========================
    // Derived state
    // ========================

    /// (home, away) goal counts, recomputed from the log.
    pub fn score(&self) -> (u32, u32) {
        (self.score_for(TeamSide::Home), self.score_for(TeamSide::Away))
    }

    pub fn score_for(&self, side: TeamSide) -> u32 {
        let name = &self.team(side).name;
        self.goals.iter().filter(|g| &g.team_name == name).count() as u32
    }

    /// Suspensions in force at the current clock time.
    pub fn active_suspensions(&self) -> Vec<ActivePenalty> {
        self.active_suspensions_at(self.clock.seconds())
    }

    pub fn active_suspensions_at(&self, time: u32) -> Vec<ActivePenalty> {
        suspension::active_suspensions(&self.penalties, time)
    }

    pub fn player_statistics(&self, side: TeamSide) -> Vec<PlayerStatLine> {
        statistics::team_player_statistics(self.team(side), &self.goals, &self.penalties)
    }

    pub fn quarter_scores(&self, side: TeamSide) -> [u32; 4] {
        statistics::quarter_scores(&self.team(side).name, &self.goals)
    }

    pub fn substitution_count(&self, side: TeamSide) -> u32 {
        statistics::substitution_count(&self.team(side).name, &self.substitutions)
    }

    // ========================
    // Clock and lifecycle
    // ========================

    /// One second of match time, applied only while the clock runs and the
    /// match is in progress. Returns whether time moved.
    pub fn tick(&mut self) -> bool {
        if self.phase != MatchPhase::InProgress {
            return false;
        }
        self.clock.tick()
    }

    pub fn set_time(&mut self, seconds: u32) -> Result<()> {
        self.ensure_in_progress()?;
        self.clock.set_seconds(seconds);
        Ok(())
    }

    /// Manual period jump; the linear-progression rule binds
    /// [`advance_period`](Self::advance_period), not the override.
    pub fn set_period(&mut self, period: MatchPeriod) -> Result<()> {
        self.ensure_in_progress()?;
        self.clock.set_period(period);
        if period == MatchPeriod::Ft {
            self.finish();
        }
        Ok(())
    }

    /// Step to the next period. At FT (or after the match ended) this is a
    /// no-op. Returns the period now in effect.
    pub fn advance_period(&mut self) -> MatchPeriod {
        if self.phase == MatchPhase::InProgress {
            if let Some(next) = self.clock.advance() {
                if next == MatchPeriod::Ft {
                    self.finish();
                }
            }
        }
        self.clock.period()
    }

    pub fn start_clock(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        self.clock.start();
        Ok(())
    }

    pub fn stop_clock(&mut self) {
        self.clock.stop();
    }

    /// Move to summary/reporting mode. Terminal; the log freezes.
    pub fn end_match(&mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.phase != MatchPhase::Summary {
            let (home, away) = self.score();
            info!("match {} finished {} - {}", self.id, home, away);
        }
        self.phase = MatchPhase::Summary;
        self.clock.stop();
    }

    // ========================
    // Internal helpers
    // ========================

    fn ensure_in_progress(&self) -> Result<()> {
        match self.phase {
            MatchPhase::InProgress => Ok(()),
            MatchPhase::Summary => Err(MatchError::MatchFinished),
        }
    }

    fn alloc_event_id(&mut self) -> EventId {
        let id = self.next_event_id;
        self.next_event_id += 1;
        id
    }

    fn resolve_player(&self, side: TeamSide, id: PlayerId) -> Result<Player> {
        let team = self.team(side);
        team.player_by_id(id).cloned().ok_or_else(|| MatchError::PlayerNotOnRoster {
            team: team.name.clone(),
            player: format!("id {}", id),
        })
    }

    fn resolve_goal_players(
        &self,
        side: TeamSide,
        scorer: PlayerId,
        assist: Option<PlayerId>,
        kind: GoalType,
    ) -> Result<(Player, Option<Player>)> {
        let scorer_player = self.resolve_player(side, scorer)?;
        let assist_player = match assist {
            Some(assist_id) => {
                if kind != GoalType::FieldGoal {
                    return Err(MatchError::AssistNotAllowed(kind));
                }
                if assist_id == scorer {
                    return Err(MatchError::ScorerIsAssist);
                }
                Some(self.resolve_player(side, assist_id)?)
            }
            None => None,
        };
        Ok((scorer_player, assist_player))
    }

    fn missing_event_error(&self, id: EventId) -> MatchError {
        let exists = self.goals.iter().any(|g| g.id == id)
            || self.penalties.iter().any(|p| p.id == id)
            || self.substitutions.iter().any(|s| s.id == id);
        if exists {
            MatchError::EventKindMismatch(id)
        } else {
            MatchError::UnknownEvent(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fixture() -> MatchState {
        MatchState::start(
            "Falcons",
            "9 Alice\n4 Bella\nCara",
            "Ravens",
            "4 Dana\n7 Erin\nFay",
            "Main Pitch",
            NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn start_validates_setup_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        assert_eq!(
            MatchState::start("", "Alice", "Ravens", "Dana", "Pitch", date),
            Err(MatchError::MissingField("home team name"))
        );
        assert_eq!(
            MatchState::start("Falcons", "Alice", "Falcons", "Dana", "Pitch", date),
            Err(MatchError::DuplicateTeamName("Falcons".to_string()))
        );
        assert_eq!(
            MatchState::start("Falcons", "Alice", "Ravens", "Dana", "  ", date),
            Err(MatchError::MissingField("venue"))
        );
        assert_eq!(
            MatchState::start("Falcons", "", "Ravens", "Dana", "Pitch", date),
            Err(MatchError::Roster(crate::roster::RosterError::Empty))
        );
    }

    #[test]
    fn goal_and_suspension_worked_example() {
        let mut m = fixture();

        // Home #9 is Alice (id 0).
        m.add_goal(TeamSide::Home, 0, GoalType::FieldGoal, None, None, 200).unwrap();
        assert_eq!(m.score(), (1, 0));

        // Away #4 is Dana (id 0), yellow card for 5 minutes at 300s.
        m.add_penalty(TeamSide::Away, 0, Card::Yellow, Some(5), 300).unwrap();
        let active = m.active_suspensions_at(400);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].player.number, 4);
        assert_eq!(active[0].end_time, 600);
        assert!(m.active_suspensions_at(600).is_empty());
    }

    #[test]
    fn goal_validation_rejects_without_side_effects() {
        let mut m = fixture();
        let before = m.clone();

        // Unknown scorer.
        assert!(matches!(
            m.add_goal(TeamSide::Home, 99, GoalType::FieldGoal, None, None, 10),
            Err(MatchError::PlayerNotOnRoster { .. })
        ));
        // Assist on a penalty corner.
        assert_eq!(
            m.add_goal(TeamSide::Home, 0, GoalType::PenaltyCorner, Some(1), None, 10),
            Err(MatchError::AssistNotAllowed(GoalType::PenaltyCorner))
        );
        // Scorer assisting herself.
        assert_eq!(
            m.add_goal(TeamSide::Home, 0, GoalType::FieldGoal, Some(0), None, 10),
            Err(MatchError::ScorerIsAssist)
        );
        assert_eq!(m, before);
    }

    #[test]
    fn penalty_validation_enforces_card_durations() {
        let mut m = fixture();
        assert!(m.add_penalty(TeamSide::Home, 0, Card::Green, Some(2), 10).is_ok());
        assert!(m.add_penalty(TeamSide::Home, 0, Card::Yellow, Some(10), 20).is_ok());
        assert!(m.add_penalty(TeamSide::Home, 0, Card::Red, None, 30).is_ok());
        assert_eq!(
            m.add_penalty(TeamSide::Home, 0, Card::Green, Some(5), 40),
            Err(MatchError::InvalidCardDuration { card: Card::Green, minutes: Some(5) })
        );
        assert_eq!(
            m.add_penalty(TeamSide::Home, 0, Card::Red, Some(10), 50),
            Err(MatchError::InvalidCardDuration { card: Card::Red, minutes: Some(10) })
        );
    }

    #[test]
    fn self_substitution_is_rejected() {
        let mut m = fixture();
        assert_eq!(
            m.add_substitution(TeamSide::Away, 1, 1, 100),
            Err(MatchError::SelfSubstitution)
        );
        assert!(m.add_substitution(TeamSide::Away, 1, 2, 100).is_ok());
    }

    #[test]
    fn event_ids_are_unique_across_kinds() {
        let mut m = fixture();
        let g = m.add_goal(TeamSide::Home, 0, GoalType::FieldGoal, None, None, 10).unwrap();
        let p = m.add_penalty(TeamSide::Away, 0, Card::Green, Some(2), 20).unwrap();
        let s = m.add_substitution(TeamSide::Home, 0, 1, 30).unwrap();
        assert!(g != p && p != s && g != s);
    }

    #[test]
    fn delete_removes_only_the_matching_event() {
        let mut m = fixture();
        let g1 = m.add_goal(TeamSide::Home, 0, GoalType::FieldGoal, None, None, 10).unwrap();
        let g2 = m.add_goal(TeamSide::Home, 1, GoalType::PenaltyCorner, None, None, 20).unwrap();
        let p = m.add_penalty(TeamSide::Away, 0, Card::Green, Some(2), 30).unwrap();

        m.delete_event(g1).unwrap();
        assert_eq!(m.score(), (1, 0));
        assert!(m.goals().iter().any(|g| g.id == g2));
        assert!(m.penalties().iter().any(|pen| pen.id == p));

        assert_eq!(m.delete_event(g1), Err(MatchError::UnknownEvent(g1)));
    }

    #[test]
    fn update_preserves_id_team_and_position() {
        let mut m = fixture();
        let g1 = m.add_goal(TeamSide::Home, 0, GoalType::FieldGoal, None, None, 10).unwrap();
        let g2 = m.add_goal(TeamSide::Home, 1, GoalType::FieldGoal, None, None, 20).unwrap();

        // Rewrite the first goal: new scorer, type and time, and a bogus
        // attempt to move it to the other team.
        let mut edited = m.goals()[0].clone();
        edited.scorer = m.home().players[2].clone();
        edited.kind = GoalType::PenaltyStroke;
        edited.time = 15;
        edited.team_name = "Ravens".to_string();
        edited.assist = None;
        m.update_event(MatchEvent::Goal(edited)).unwrap();

        let goals = m.goals();
        assert_eq!(goals[0].id, g1);
        assert_eq!(goals[0].team_name, "Falcons");
        assert_eq!(goals[0].scorer.name, "Cara");
        assert_eq!(goals[0].kind, GoalType::PenaltyStroke);
        assert_eq!(goals[1].id, g2);
        // Editing goals never moves the score.
        assert_eq!(m.score(), (2, 0));
    }

    #[test]
    fn update_rejects_wrong_kind_and_unknown_ids() {
        let mut m = fixture();
        let g = m.add_goal(TeamSide::Home, 0, GoalType::FieldGoal, None, None, 10).unwrap();

        let impostor = Penalty {
            id: g,
            team_name: "Falcons".to_string(),
            player: m.home().players[0].clone(),
            card: Card::Green,
            time: 10,
            duration: Some(2),
        };
        assert_eq!(
            m.update_event(MatchEvent::Penalty(impostor.clone())),
            Err(MatchError::EventKindMismatch(g))
        );

        let ghost = Penalty { id: 999, ..impostor };
        assert_eq!(
            m.update_event(MatchEvent::Penalty(ghost)),
            Err(MatchError::UnknownEvent(999))
        );
    }

    #[test]
    fn update_revalidates_against_the_owning_roster() {
        let mut m = fixture();
        m.add_penalty(TeamSide::Away, 0, Card::Yellow, Some(5), 300).unwrap();

        let mut edited = m.penalties()[0].clone();
        edited.duration = Some(3);
        assert_eq!(
            m.update_event(MatchEvent::Penalty(edited.clone())),
            Err(MatchError::InvalidCardDuration { card: Card::Yellow, minutes: Some(3) })
        );

        edited.duration = Some(10);
        edited.player = Player { id: 42, name: "Nobody".to_string(), number: 99 };
        assert!(matches!(
            m.update_event(MatchEvent::Penalty(edited)),
            Err(MatchError::PlayerNotOnRoster { .. })
        ));

        // The stored penalty is untouched.
        assert_eq!(m.penalties()[0].duration, Some(5));
    }

    #[test]
    fn event_log_sorts_for_presentation_only() {
        let mut m = fixture();
        m.add_goal(TeamSide::Home, 0, GoalType::FieldGoal, None, None, 300).unwrap();
        m.add_penalty(TeamSide::Away, 0, Card::Green, Some(2), 100).unwrap();
        m.add_substitution(TeamSide::Home, 0, 1, 200).unwrap();

        let chrono: Vec<u32> = m.event_log(SortOrder::Chronological).iter().map(|e| e.time()).collect();
        assert_eq!(chrono, vec![100, 200, 300]);
        let reverse: Vec<u32> =
            m.event_log(SortOrder::ReverseChronological).iter().map(|e| e.time()).collect();
        assert_eq!(reverse, vec![300, 200, 100]);
        // Internal sequences keep insertion order.
        assert_eq!(m.goals()[0].time, 300);
    }

    #[test]
    fn advance_period_reaches_ft_in_five_steps_then_stays() {
        let mut m = fixture();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(m.advance_period());
        }
        assert_eq!(
            seen,
            vec![
                MatchPeriod::Q2,
                MatchPeriod::Ht,
                MatchPeriod::Q3,
                MatchPeriod::Q4,
                MatchPeriod::Ft
            ]
        );
        assert_eq!(m.phase(), MatchPhase::Summary);

        // The sixth call is a no-op.
        assert_eq!(m.advance_period(), MatchPeriod::Ft);
        assert_eq!(m.phase(), MatchPhase::Summary);
    }

    #[test]
    fn finished_match_freezes_the_log_and_clock() {
        let mut m = fixture();
        m.add_goal(TeamSide::Home, 0, GoalType::FieldGoal, None, None, 10).unwrap();
        m.start_clock().unwrap();
        m.end_match();

        assert_eq!(
            m.add_goal(TeamSide::Home, 0, GoalType::FieldGoal, None, None, 20),
            Err(MatchError::MatchFinished)
        );
        assert_eq!(m.delete_event(1), Err(MatchError::MatchFinished));
        assert_eq!(m.set_time(500), Err(MatchError::MatchFinished));
        assert_eq!(m.set_period(MatchPeriod::Q2), Err(MatchError::MatchFinished));
        assert_eq!(m.start_clock(), Err(MatchError::MatchFinished));
        assert!(!m.tick());
        assert_eq!(m.score(), (1, 0));
    }

    #[test]
    fn set_period_jumps_apply_anchors_and_ft_ends_the_match() {
        let mut m = fixture();
        m.set_time(437).unwrap();
        m.set_period(MatchPeriod::Q4).unwrap();
        assert_eq!(m.clock().seconds(), 2700);

        m.set_time(3010).unwrap();
        m.set_period(MatchPeriod::Ft).unwrap();
        assert_eq!(m.clock().seconds(), 3010);
        assert_eq!(m.phase(), MatchPhase::Summary);
    }

    #[test]
    fn tick_advances_only_while_running() {
        let mut m = fixture();
        assert!(!m.tick());
        m.start_clock().unwrap();
        assert!(m.tick());
        assert!(m.tick());
        assert_eq!(m.clock().seconds(), 2);
        m.stop_clock();
        assert!(!m.tick());
        assert_eq!(m.clock().seconds(), 2);
    }

    proptest! {
        #[test]
        fn score_always_equals_goal_count(
            ops in proptest::collection::vec((any::<bool>(), 0u8..3), 0..40)
        ) {
            let mut m = fixture();
            let mut live: Vec<(EventId, TeamSide)> = Vec::new();
            let mut expected = (0u32, 0u32);

            for (is_home, action) in ops {
                let side = if is_home { TeamSide::Home } else { TeamSide::Away };
                if action < 2 {
                    let id = m
                        .add_goal(side, 0, GoalType::FieldGoal, None, None, 100)
                        .unwrap();
                    live.push((id, side));
                    match side {
                        TeamSide::Home => expected.0 += 1,
                        TeamSide::Away => expected.1 += 1,
                    }
                } else if let Some((id, gone)) = live.pop() {
                    m.delete_event(id).unwrap();
                    match gone {
                        TeamSide::Home => expected.0 -= 1,
                        TeamSide::Away => expected.1 -= 1,
                    }
                }
                prop_assert_eq!(m.score(), expected);
            }
        }
    }
}
