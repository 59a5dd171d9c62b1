//! The recurring one-second tick that drives a running countdown

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Time between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Holds at most one recurring tick.
///
/// Scheduling always replaces the previous interval, so two live tick
/// sources can never coexist.
#[derive(Debug, Default)]
pub struct Ticker {
    interval: Option<Interval>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking one period from now, replacing any current interval
    pub fn schedule(&mut self) {
        self.cancel();
        let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn cancel(&mut self) {
        self.interval = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next tick. Never completes while nothing is scheduled.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
