//! Utility functions module
//! 
//! Small helpers shared by the timer, the display and the server.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::format_clock;
pub use signals::shutdown_signal;
