//! Greenhouse — one independently timed watering plot.

use serde::{Deserialize, Serialize};

use crate::duration::WateringDuration;
use crate::error::{GreenhubError, ValidationError};
use crate::time::Timestamp;

/// Derived view of a greenhouse's countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No timer is set.
    Idle,
    /// Counting down; holds the remaining whole seconds (always > 0).
    Running(u32),
    /// The countdown reached zero and is waiting to be acknowledged.
    JustCompleted,
}

/// One watering plot and its live timer state.
///
/// `current_time` and `target_time` are set and cleared together:
/// both are `None` while idle, both are `Some` while a run is in flight.
/// `current_time == Some(0)` is the transient just-completed state, distinct
/// from idle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Greenhouse {
    /// Human-readable name shown by the presentation layer.
    pub label: String,
    /// When the most recent run was started, if any.
    pub last_run: Option<Timestamp>,
    /// Seconds remaining in the current run, `Some(0)` when just completed.
    pub current_time: Option<u32>,
    /// Absolute completion deadline of the current run.
    pub target_time: Option<Timestamp>,
}

impl Greenhouse {
    /// Create an idle greenhouse with the given label.
    #[must_use]
    pub fn idle(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            last_run: None,
            current_time: None,
            target_time: None,
        }
    }

    /// Derive the timer state from the countdown fields.
    #[must_use]
    pub fn state(&self) -> TimerState {
        match self.current_time {
            None => TimerState::Idle,
            Some(0) => TimerState::JustCompleted,
            Some(secs) => TimerState::Running(secs),
        }
    }

    /// Whether no run is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state() == TimerState::Idle
    }

    /// Arm the countdown: record the start time and compute the absolute
    /// deadline from the selected duration.
    pub fn begin(&mut self, now: Timestamp, duration: WateringDuration) {
        self.last_run = Some(now);
        self.target_time = Some(now + chrono::TimeDelta::seconds(i64::from(duration.seconds())));
        self.current_time = Some(duration.seconds());
    }

    /// Update the displayed countdown to the given remaining seconds.
    pub fn set_remaining(&mut self, seconds: u32) {
        self.current_time = Some(seconds);
    }

    /// Clear the countdown fields, returning to idle. `last_run` is kept as
    /// a record of the most recent start.
    pub fn clear(&mut self) {
        self.current_time = None;
        self.target_time = None;
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GreenhubError::Validation`] when the label is empty or when
    /// only one of `current_time`/`target_time` is set.
    pub fn validate(&self) -> Result<(), GreenhubError> {
        if self.label.is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        if self.current_time.is_some() != self.target_time.is_some() {
            return Err(ValidationError::InconsistentCountdown.into());
        }
        Ok(())
    }

    /// Whether the countdown fields are mutually consistent.
    #[must_use]
    pub fn countdown_consistent(&self) -> bool {
        self.current_time.is_some() == self.target_time.is_some()
            && (self.current_time.is_none() || self.last_run.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_start_idle_with_no_countdown() {
        let g = Greenhouse::idle("Solar 1");
        assert_eq!(g.state(), TimerState::Idle);
        assert!(g.countdown_consistent());
    }

    #[test]
    fn should_enter_running_state_when_begun() {
        let mut g = Greenhouse::idle("Solar 1");
        let t0 = now();
        g.begin(t0, WateringDuration::M5);

        assert_eq!(g.state(), TimerState::Running(300));
        assert_eq!(g.last_run, Some(t0));
        assert_eq!(g.target_time, Some(t0 + chrono::TimeDelta::seconds(300)));
        assert!(g.countdown_consistent());
    }

    #[test]
    fn should_report_just_completed_when_countdown_hits_zero() {
        let mut g = Greenhouse::idle("Solar 1");
        g.begin(now(), WateringDuration::M5);
        g.set_remaining(0);
        assert_eq!(g.state(), TimerState::JustCompleted);
        assert!(!g.is_idle());
    }

    #[test]
    fn should_keep_last_run_after_clear() {
        let mut g = Greenhouse::idle("Solar 1");
        let t0 = now();
        g.begin(t0, WateringDuration::M10);
        g.clear();

        assert_eq!(g.state(), TimerState::Idle);
        assert_eq!(g.last_run, Some(t0));
        assert!(g.countdown_consistent());
    }

    #[test]
    fn should_serialize_with_camel_case_fields() {
        let mut g = Greenhouse::idle("Solar 1");
        g.begin(now(), WateringDuration::M5);
        let json = serde_json::to_value(&g).unwrap();
        assert!(json.get("lastRun").is_some());
        assert!(json.get("currentTime").is_some());
        assert!(json.get("targetTime").is_some());
    }
}
