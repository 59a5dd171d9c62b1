//! Countdown timer core
//! 
//! The engine owns all timing state; the ticker is the single recurring
//! callback that keeps a running countdown moving.

pub mod engine;
pub mod ticker;

// Re-export main types
pub use engine::TimerEngine;
pub use ticker::{Ticker, TICK_PERIOD};
