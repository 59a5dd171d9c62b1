//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::state::MAX_SECONDS_FIELD;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "whistle-timer")]
#[command(about = "A countdown timer with start and end whistles, controlled over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Default minutes field, restored on reset
    #[arg(short, long, default_value = "10")]
    pub minutes: u64,

    /// Default seconds field, restored on reset
    #[arg(short, long, default_value = "0")]
    pub seconds: u64,

    /// Largest value the minutes field accepts
    #[arg(long, default_value = "15")]
    pub max_minutes: u64,

    /// Program used to play the whistle sounds
    #[arg(long, default_value = "paplay")]
    pub player: String,

    /// Sound played when the countdown starts or resumes
    #[arg(long, default_value = "sounds/whistle-start.wav")]
    pub start_sound: PathBuf,

    /// Sound played when the countdown reaches zero
    #[arg(long, default_value = "sounds/whistle-end.wav")]
    pub end_sound: PathBuf,

    /// Do not play any sounds
    #[arg(long)]
    pub mute: bool,

    /// Start the countdown right after boot
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Reject default fields the duration input would read back as 0
    pub fn validate(&self) -> Result<(), String> {
        if self.minutes > self.max_minutes {
            return Err(format!(
                "--minutes {} is above --max-minutes {}",
                self.minutes, self.max_minutes
            ));
        }
        if self.seconds > MAX_SECONDS_FIELD {
            return Err(format!(
                "--seconds {} is above {}",
                self.seconds, MAX_SECONDS_FIELD
            ));
        }
        Ok(())
    }
}
