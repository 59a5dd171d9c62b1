//! External collaborator module
//! 
//! This module contains the display and audio collaborators the countdown
//! engine drives.

pub mod audio;
pub mod display;

// Re-export main types
pub use audio::{describe_audio, AudioCues, CommandPlayer, Cue, SilentAudio};
pub use display::{DisplaySink, WatchDisplay};
