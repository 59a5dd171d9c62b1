//! State management module
//! 
//! This module contains the countdown state, the duration fields and the
//! shared server state.

pub mod app_state;
pub mod duration_input;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use duration_input::{DurationChoices, DurationInput, FieldChoice, MAX_SECONDS_FIELD};
pub use timer_state::{TimerPhase, TimerState};
