//! Whistle cues played through a system sound player

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use tokio::process::Command;
use tracing::{debug, info, warn};

/// Audio cue triggered by the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Start,
    End,
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Start => f.write_str("start"),
            Cue::End => f.write_str("end"),
        }
    }
}

/// Fire-and-forget cue playback.
///
/// Implementations must return immediately and never report failures back;
/// the countdown does not depend on whether a cue was heard.
pub trait AudioCues: Send + Sync {
    fn play(&self, cue: Cue);
}

/// Plays cues by running `<player> <sound file>`
#[derive(Debug)]
pub struct CommandPlayer {
    player: String,
    start_sound: PathBuf,
    end_sound: PathBuf,
    preloaded: AtomicBool,
}

impl CommandPlayer {
    pub fn new(player: String, start_sound: PathBuf, end_sound: PathBuf) -> Self {
        Self {
            player,
            start_sound,
            end_sound,
            preloaded: AtomicBool::new(false),
        }
    }

    fn sound_for(&self, cue: Cue) -> &Path {
        match cue {
            Cue::Start => &self.start_sound,
            Cue::End => &self.end_sound,
        }
    }

    /// One-time check before the first cue that both sound files are there
    fn preload(&self) {
        if self.preloaded.swap(true, Ordering::SeqCst) {
            return;
        }

        let sounds = [
            (Cue::Start, self.start_sound.clone()),
            (Cue::End, self.end_sound.clone()),
        ];
        tokio::spawn(async move {
            for (cue, path) in sounds {
                match tokio::fs::metadata(&path).await {
                    Ok(_) => debug!("{} sound ready: {}", cue, path.display()),
                    Err(e) => warn!("{} sound preload error ({}): {}", cue, path.display(), e),
                }
            }
        });
    }
}

impl AudioCues for CommandPlayer {
    fn play(&self, cue: Cue) {
        self.preload();

        let player = self.player.clone();
        let sound = self.sound_for(cue).to_path_buf();
        tokio::spawn(async move {
            match run_player(&player, &sound).await {
                Ok(()) => debug!("{} cue played", cue),
                Err(e) => warn!("{} cue blocked: {}", cue, e),
            }
        });
    }
}

async fn run_player(player: &str, sound: &Path) -> Result<(), String> {
    let output = Command::new(player)
        .arg(sound)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", player, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", player, stderr.trim()));
    }

    Ok(())
}

/// Cue sink used with `--mute`
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioCues for SilentAudio {
    fn play(&self, cue: Cue) {
        debug!("Muted {} cue", cue);
    }
}

/// Log which audio collaborator is in use
pub fn describe_audio(mute: bool, player: &str) {
    if mute {
        info!("Audio cues muted");
    } else {
        info!("Audio cues played with {}", player);
    }
}
