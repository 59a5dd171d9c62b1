//! Shared server state

use std::{sync::Mutex, time::Instant};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::warn;

use crate::tasks::TimerHandle;

/// State shared by all HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Control handle of the timer task
    pub timer: TimerHandle,
    /// Latest clock face published by the display
    pub display_rx: watch::Receiver<String>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(
        port: u16,
        host: String,
        timer: TimerHandle,
        display_rx: watch::Receiver<String>,
    ) -> Self {
        Self {
            timer,
            display_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Remember the control action that was just performed
    pub fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action.to_string()),
            Err(e) => warn!("Failed to lock last action: {}", e),
        }
        match self.last_action_time.lock() {
            Ok(mut last_time) => *last_time = Some(Utc::now()),
            Err(e) => warn!("Failed to lock last action time: {}", e),
        }
    }

    /// Clock face as last shown
    pub fn current_display(&self) -> String {
        self.display_rx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
