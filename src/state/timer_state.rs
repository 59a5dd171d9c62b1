//! Timer state structure and time accounting

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Phase of the countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Finished => "finished",
        }
    }
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time accounting for a single countdown.
///
/// While running, remaining time is always derived from `deadline`; while
/// paused, from `remaining_at_pause`. The two are never live together.
#[derive(Debug, Clone)]
pub struct TimerState {
    pub phase: TimerPhase,
    pub duration_seconds: u64,
    pub deadline: Option<Instant>,
    pub remaining_at_pause: u64,
}

impl TimerState {
    /// Create an idle timer with the given countdown length
    pub fn new(duration_seconds: u64) -> Self {
        Self {
            phase: TimerPhase::Idle,
            duration_seconds,
            deadline: None,
            remaining_at_pause: 0,
        }
    }

    /// Whole seconds left before `deadline`, rounded down. Zero once it has passed.
    pub fn seconds_until_deadline(&self, now: Instant) -> u64 {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now).as_secs())
            .unwrap_or(0)
    }

    /// Seconds shown on the clock face for the current phase
    pub fn remaining_seconds(&self, now: Instant) -> u64 {
        match self.phase {
            TimerPhase::Idle => self.duration_seconds,
            TimerPhase::Running => self.seconds_until_deadline(now),
            TimerPhase::Paused => self.remaining_at_pause,
            TimerPhase::Finished => 0,
        }
    }

    /// Begin a fresh countdown of `duration_seconds`
    pub fn begin(&mut self, duration_seconds: u64, now: Instant) {
        self.duration_seconds = duration_seconds;
        self.remaining_at_pause = 0;
        self.deadline = Some(now + Duration::from_secs(duration_seconds));
        self.phase = TimerPhase::Running;
    }

    /// Freeze the countdown, keeping the whole seconds left
    pub fn pause(&mut self, now: Instant) {
        self.remaining_at_pause = self.seconds_until_deadline(now);
        self.deadline = None;
        self.phase = TimerPhase::Paused;
    }

    /// Continue a paused countdown from exactly where it stopped
    pub fn resume(&mut self, now: Instant) {
        self.deadline = Some(now + Duration::from_secs(self.remaining_at_pause));
        self.remaining_at_pause = 0;
        self.phase = TimerPhase::Running;
    }

    pub fn finish(&mut self) {
        self.deadline = None;
        self.remaining_at_pause = 0;
        self.phase = TimerPhase::Finished;
    }

    /// Back to idle with the given countdown length
    pub fn reset(&mut self, duration_seconds: u64) {
        *self = Self::new(duration_seconds);
    }
}
