//! Active-suspension derivation.
//!
//! Recomputed in full from the penalty log on every query: cards and
//! durations can be edited retroactively, so there is nothing safe to
//! patch incrementally.

use serde::{Deserialize, Serialize};

use crate::models::{EventId, Penalty, Player};

/// A currently-served suspension. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePenalty {
    pub penalty_id: EventId,
    pub player: Player,
    pub team_name: String,
    /// Match time in seconds at which the suspension ends.
    pub end_time: u32,
}

/// Suspensions in force at `now`, soonest-expiring first.
///
/// A penalty qualifies iff it carries a duration (red cards never do) and
/// `now` lies in `[time, time + duration * 60)`.
pub fn active_suspensions(penalties: &[Penalty], now: u32) -> Vec<ActivePenalty> {
    let mut active: Vec<ActivePenalty> = penalties
        .iter()
        .filter_map(|penalty| {
            let end_time = penalty.end_time()?;
            if now >= penalty.time && now < end_time {
                Some(ActivePenalty {
                    penalty_id: penalty.id,
                    player: penalty.player.clone(),
                    team_name: penalty.team_name.clone(),
                    end_time,
                })
            } else {
                None
            }
        })
        .collect();

    active.sort_by_key(|a| a.end_time);
    active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Card;
    use proptest::prelude::*;

    fn penalty(id: EventId, card: Card, time: u32, duration: Option<u32>) -> Penalty {
        Penalty {
            id,
            team_name: "Falcons".to_string(),
            player: Player { id: id as u32, name: format!("P{}", id), number: id as u32 + 1 },
            card,
            time,
            duration,
        }
    }

    #[test]
    fn green_card_window_is_two_minutes_half_open() {
        let penalties = vec![penalty(1, Card::Green, 100, Some(2))];
        assert!(active_suspensions(&penalties, 99).is_empty());
        assert_eq!(active_suspensions(&penalties, 100).len(), 1);
        assert_eq!(active_suspensions(&penalties, 219).len(), 1);
        assert!(active_suspensions(&penalties, 220).is_empty());
    }

    #[test]
    fn yellow_card_windows_follow_duration() {
        let five = vec![penalty(1, Card::Yellow, 300, Some(5))];
        assert_eq!(active_suspensions(&five, 400)[0].end_time, 600);
        assert!(active_suspensions(&five, 600).is_empty());

        let ten = vec![penalty(2, Card::Yellow, 300, Some(10))];
        assert_eq!(active_suspensions(&ten, 899).len(), 1);
        assert!(active_suspensions(&ten, 900).is_empty());
    }

    #[test]
    fn red_cards_never_appear() {
        let penalties = vec![penalty(1, Card::Red, 0, None)];
        for now in [0, 1, 600, 3600] {
            assert!(active_suspensions(&penalties, now).is_empty());
        }
    }

    #[test]
    fn overlapping_windows_sort_by_end_time() {
        let penalties = vec![
            penalty(1, Card::Yellow, 100, Some(10)),
            penalty(2, Card::Green, 500, Some(2)),
            penalty(3, Card::Yellow, 400, Some(5)),
        ];
        let active = active_suspensions(&penalties, 550);
        let ends: Vec<u32> = active.iter().map(|a| a.end_time).collect();
        assert_eq!(ends, vec![620, 700, 700]);
        // Equal end times keep log order.
        assert_eq!(active[1].penalty_id, 1);
        assert_eq!(active[2].penalty_id, 3);
    }

    proptest! {
        #[test]
        fn output_is_sorted_and_every_entry_is_in_window(
            cards in proptest::collection::vec(
                (0u32..2000, prop_oneof![Just(2u32), Just(5), Just(10)]),
                0..20,
            ),
            now in 0u32..4000,
        ) {
            let penalties: Vec<Penalty> = cards
                .iter()
                .enumerate()
                .map(|(i, (time, minutes))| {
                    let card = if *minutes == 2 { Card::Green } else { Card::Yellow };
                    penalty(i as EventId, card, *time, Some(*minutes))
                })
                .collect();

            let active = active_suspensions(&penalties, now);

            for pair in active.windows(2) {
                prop_assert!(pair[0].end_time <= pair[1].end_time);
            }
            for entry in &active {
                let source = &penalties[entry.penalty_id as usize];
                prop_assert!(now >= source.time);
                prop_assert!(now < entry.end_time);
            }
            let expected = penalties
                .iter()
                .filter(|p| now >= p.time && now < p.end_time().unwrap())
                .count();
            prop_assert_eq!(active.len(), expected);
        }
    }
}
