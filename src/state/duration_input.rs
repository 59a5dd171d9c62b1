//! Minute and second fields the countdown length is read from

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest value the seconds field accepts
pub const MAX_SECONDS_FIELD: u64 = 59;

/// A selectable field value with its zero-padded label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChoice {
    pub value: u64,
    pub label: String,
}

/// Selectable values for both fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationChoices {
    pub minutes: Vec<FieldChoice>,
    pub seconds: Vec<FieldChoice>,
}

/// Raw minute and second fields.
///
/// Fields hold whatever the control surface sent; they are only interpreted
/// when read. Anything non-numeric or out of range reads as 0.
#[derive(Debug, Clone)]
pub struct DurationInput {
    minutes: String,
    seconds: String,
    default_minutes: u64,
    default_seconds: u64,
    max_minutes: u64,
}

impl DurationInput {
    /// Create fields holding the defaults
    pub fn new(default_minutes: u64, default_seconds: u64, max_minutes: u64) -> Self {
        Self {
            minutes: default_minutes.to_string(),
            seconds: default_seconds.to_string(),
            default_minutes,
            default_seconds,
            max_minutes,
        }
    }

    /// Replace the fields that were supplied
    pub fn set(&mut self, minutes: Option<String>, seconds: Option<String>) {
        if let Some(minutes) = minutes {
            self.minutes = minutes;
        }
        if let Some(seconds) = seconds {
            self.seconds = seconds;
        }
        debug!("Duration fields set to {:?}:{:?}", self.minutes, self.seconds);
    }

    /// Interpret both fields as `(minutes, seconds)`
    pub fn read(&self) -> (u64, u64) {
        (
            parse_field("minutes", &self.minutes, self.max_minutes),
            parse_field("seconds", &self.seconds, MAX_SECONDS_FIELD),
        )
    }

    pub fn restore_default(&mut self) {
        self.minutes = self.default_minutes.to_string();
        self.seconds = self.default_seconds.to_string();
    }

    /// Countdown length the default fields describe
    pub fn default_duration_seconds(&self) -> u64 {
        self.default_minutes
            .saturating_mul(60)
            .saturating_add(self.default_seconds)
    }

    pub fn minutes_field(&self) -> &str {
        &self.minutes
    }

    pub fn seconds_field(&self) -> &str {
        &self.seconds
    }

    /// Values offered for each field, labelled the way the clock shows them
    pub fn choices(&self) -> DurationChoices {
        DurationChoices {
            minutes: (0..=self.max_minutes).map(field_choice).collect(),
            seconds: (0..=MAX_SECONDS_FIELD).map(field_choice).collect(),
        }
    }
}

fn field_choice(value: u64) -> FieldChoice {
    FieldChoice {
        value,
        label: format!("{:02}", value),
    }
}

fn parse_field(name: &str, raw: &str, max: u64) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(value) if value <= max => value,
        Ok(value) => {
            debug!("{} field {} is above {}, reading as 0", name, value, max);
            0
        }
        Err(_) => {
            debug!("{} field {:?} is not a number, reading as 0", name, raw);
            0
        }
    }
}
