//! Whistle Timer - A countdown timer with start and end whistles
//! 
//! This library provides the countdown engine, the task that owns it, the
//! display and audio collaborators, and an HTTP control surface.

pub mod config;
pub mod state;
pub mod timer;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use timer::TimerEngine;
pub use api::create_router;
pub use tasks::{spawn_timer, TimerHandle};
pub use utils::signals::shutdown_signal;
