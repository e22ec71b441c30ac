pub mod json_api;

pub use json_api::{
    add_event_json, advance_period_json, delete_event_json, end_match_json, event_log_json,
    match_summary_json, set_clock_json, start_match_json, update_event_json, ClockRequest,
    EventRequest, EventResponse, MatchSnapshot, StartMatchRequest, SummaryResponse,
};
