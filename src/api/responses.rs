//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tasks::TimerSnapshot;

/// Body of `PUT /duration` and the optional body of `POST /start`.
///
/// Fields may be JSON numbers or strings; anything else is kept as text and
/// later reads as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DurationRequest {
    pub minutes: Option<Value>,
    pub seconds: Option<Value>,
}

impl DurationRequest {
    pub fn minutes_field(&self) -> Option<String> {
        self.minutes.as_ref().map(field_text)
    }

    pub fn seconds_field(&self) -> Option<String> {
        self.seconds.as_ref().map(field_text)
    }
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a response whose status is the timer's phase
    pub fn new(message: String, timer: TimerSnapshot) -> Self {
        Self {
            status: timer.phase.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Status response with the clock face and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub display: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
