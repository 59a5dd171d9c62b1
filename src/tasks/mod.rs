//! Background tasks module
//! 
//! This module contains the task that owns the countdown and runs alongside
//! the HTTP server.

pub mod timer_task;

// Re-export main types
pub use timer_task::{spawn_timer, TimerHandle, TimerSnapshot};
