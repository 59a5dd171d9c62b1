//! Countdown engine: phase transitions and wall-clock time accounting

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::{
    services::{AudioCues, Cue, DisplaySink},
    state::{TimerPhase, TimerState},
    utils::format_clock,
};

use super::Ticker;

/// Owns the countdown state and drives the display and audio collaborators.
///
/// Remaining time is always computed from an absolute deadline, so late or
/// skipped ticks never make the countdown drift. Every operation is total:
/// calls that make no sense in the current phase are ignored.
pub struct TimerEngine {
    state: TimerState,
    default_duration_seconds: u64,
    ticker: Ticker,
    display: Arc<dyn DisplaySink>,
    audio: Arc<dyn AudioCues>,
}

impl TimerEngine {
    /// Create an idle engine whose reset length is `default_duration_seconds`
    pub fn new(
        default_duration_seconds: u64,
        display: Arc<dyn DisplaySink>,
        audio: Arc<dyn AudioCues>,
    ) -> Self {
        Self {
            state: TimerState::new(default_duration_seconds),
            default_duration_seconds,
            ticker: Ticker::new(),
            display,
            audio,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    pub fn duration_seconds(&self) -> u64 {
        self.state.duration_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.remaining_seconds(Instant::now())
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_scheduled()
    }

    /// Start a new countdown, or resume a paused one.
    ///
    /// `minutes` and `seconds` are only used when starting from idle or
    /// finished. Does nothing while already running.
    pub fn start(&mut self, minutes: u64, seconds: u64) {
        match self.state.phase {
            TimerPhase::Running => {
                debug!("Timer already running, ignoring start");
            }
            TimerPhase::Paused => self.resume(),
            TimerPhase::Idle | TimerPhase::Finished => {
                let duration = minutes.saturating_mul(60).saturating_add(seconds);
                self.state.begin(duration, Instant::now());
                info!("Countdown started for {}", format_clock(duration));

                self.display.show(&format_clock(duration));
                self.audio.play(Cue::Start);
                self.ticker.schedule();
            }
        }
    }

    /// Pause a running countdown or resume a paused one
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            TimerPhase::Running => {
                self.ticker.cancel();
                self.state.pause(Instant::now());
                info!(
                    "Countdown paused with {} left",
                    format_clock(self.state.remaining_at_pause)
                );
            }
            TimerPhase::Paused => self.resume(),
            TimerPhase::Idle | TimerPhase::Finished => {
                debug!("Nothing to pause in phase {}", self.state.phase);
            }
        }
    }

    /// Stop everything and go back to the default length
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.state.reset(self.default_duration_seconds);
        info!("Countdown reset to {}", format_clock(self.default_duration_seconds));

        self.display.show(&format_clock(self.default_duration_seconds));
    }

    /// Wait until the next tick is due. Pending forever unless running.
    pub async fn next_tick(&mut self) {
        self.ticker.tick().await;
    }

    /// Recompute the remaining time against the deadline
    pub fn on_tick(&mut self) {
        if self.state.phase != TimerPhase::Running {
            return;
        }

        let remaining = self.state.seconds_until_deadline(Instant::now());
        if remaining == 0 {
            self.ticker.cancel();
            self.state.finish();
            info!("Countdown finished");

            self.display.show(&format_clock(0));
            self.audio.play(Cue::End);
        } else {
            self.display.show(&format_clock(remaining));
        }
    }

    fn resume(&mut self) {
        let remaining = self.state.remaining_at_pause;
        self.state.resume(Instant::now());
        info!("Countdown resumed with {} left", format_clock(remaining));

        self.audio.play(Cue::Start);
        self.ticker.schedule();
    }
}
