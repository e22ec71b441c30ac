pub mod clock;
pub mod statistics;
pub mod suspension;
pub mod ticker;

pub use clock::{format_clock, parse_clock, MatchClock, MatchPeriod};
pub use statistics::{quarter_scores, team_player_statistics, PlayerStatLine};
pub use suspension::{active_suspensions, ActivePenalty};
pub use ticker::MatchTicker;
