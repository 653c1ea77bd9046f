//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `last_run`, `target_time`, and log entry dates.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Whole minutes between two timestamps, rounded to the nearest minute.
///
/// Negative spans (clock adjusted backwards) clamp to zero.
#[must_use]
pub fn minutes_between(start: Timestamp, end: Timestamp) -> i64 {
    let millis = (end - start).num_milliseconds().max(0);
    // Integer rounding: (x + half) / unit
    (millis + 30_000) / 60_000
}

/// Whole seconds remaining until `deadline`, rounded, floored at zero.
#[must_use]
pub fn seconds_until(now: Timestamp, deadline: Timestamp) -> u32 {
    let millis = (deadline - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    u32::try_from((millis + 500) / 1000).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_round_minutes_to_nearest() {
        let start = now();
        assert_eq!(minutes_between(start, start + TimeDelta::seconds(89)), 1);
        assert_eq!(minutes_between(start, start + TimeDelta::seconds(90)), 2);
        assert_eq!(minutes_between(start, start + TimeDelta::seconds(600)), 10);
    }

    #[test]
    fn should_clamp_negative_spans_to_zero() {
        let start = now();
        assert_eq!(minutes_between(start, start - TimeDelta::seconds(120)), 0);
        assert_eq!(seconds_until(start, start - TimeDelta::seconds(5)), 0);
    }

    #[test]
    fn should_round_remaining_seconds_from_deadline() {
        let t = now();
        let deadline = t + TimeDelta::milliseconds(4_499);
        assert_eq!(seconds_until(t, deadline), 4);
        let deadline = t + TimeDelta::milliseconds(4_500);
        assert_eq!(seconds_until(t, deadline), 5);
    }
}
