//! Liveness evaluation for the checker.
//!
//! The host runtime decides how to react to an unhealthy checker; this
//! module only answers the question from the recorded facts. The checker is
//! working iff it emitted an event within the configured silence window and
//! no error was logged since that event. Pure function of its inputs — no
//! internal state.

use chrono::{DateTime, Duration, Utc};

use crate::state::CheckerState;

/// Evaluate the liveness contract against recorded state.
///
/// `max_silence_days` is the operator's `expected_receive_period_in_days`:
/// the longest gap between emitted events they consider normal.
pub fn is_working(state: &CheckerState, max_silence_days: i64, now: DateTime<Utc>) -> bool {
    let event_recent = match state.last_event_at {
        Some(at) => now - at <= Duration::days(max_silence_days),
        None => false,
    };

    let recent_error = match (state.last_error_at, state.last_event_at) {
        (Some(error_at), Some(event_at)) => error_at > event_at,
        (Some(_), None) => true,
        (None, _) => false,
    };

    event_recent && !recent_error
}
