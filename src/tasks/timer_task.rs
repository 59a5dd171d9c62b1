//! Timer background task
//!
//! The task is the only owner of the engine and the duration fields. Control
//! requests reach it over a channel and ticks come from the engine's own
//! ticker, so every mutation happens on this one task.

use serde::{Deserialize, Serialize};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::{
    state::{DurationChoices, DurationInput, TimerPhase},
    timer::TimerEngine,
    utils::format_clock,
};

const COMMAND_BUFFER: usize = 32;

/// Point-in-time view of the countdown and its input fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub duration_seconds: u64,
    pub remaining_seconds: u64,
    pub display: String,
    pub pause_label: String,
    pub minutes_field: String,
    pub seconds_field: String,
}

impl TimerSnapshot {
    fn capture(engine: &TimerEngine, input: &DurationInput) -> Self {
        let remaining_seconds = engine.remaining_seconds();
        let pause_label = match engine.phase() {
            TimerPhase::Paused => "Continue",
            _ => "Pause",
        };

        Self {
            phase: engine.phase(),
            duration_seconds: engine.duration_seconds(),
            remaining_seconds,
            display: format_clock(remaining_seconds),
            pause_label: pause_label.to_string(),
            minutes_field: input.minutes_field().to_string(),
            seconds_field: input.seconds_field().to_string(),
        }
    }
}

/// Requests handled by the timer task
#[derive(Debug)]
enum TimerCommand {
    Start {
        reply: oneshot::Sender<TimerSnapshot>,
    },
    TogglePause {
        reply: oneshot::Sender<TimerSnapshot>,
    },
    Reset {
        reply: oneshot::Sender<TimerSnapshot>,
    },
    SetDuration {
        minutes: Option<String>,
        seconds: Option<String>,
        reply: oneshot::Sender<TimerSnapshot>,
    },
    Snapshot {
        reply: oneshot::Sender<TimerSnapshot>,
    },
    Choices {
        reply: oneshot::Sender<DurationChoices>,
    },
}

/// Cloneable control surface for the timer task
#[derive(Debug, Clone)]
pub struct TimerHandle {
    tx: mpsc::Sender<TimerCommand>,
}

impl TimerHandle {
    /// Start from the duration fields, or resume if paused
    pub async fn start(&self) -> Result<TimerSnapshot, String> {
        self.request(|reply| TimerCommand::Start { reply }).await
    }

    pub async fn toggle_pause(&self) -> Result<TimerSnapshot, String> {
        self.request(|reply| TimerCommand::TogglePause { reply }).await
    }

    /// Reset the countdown and restore the default duration fields
    pub async fn reset(&self) -> Result<TimerSnapshot, String> {
        self.request(|reply| TimerCommand::Reset { reply }).await
    }

    /// Replace the supplied duration fields; takes effect on the next fresh start
    pub async fn set_duration(
        &self,
        minutes: Option<String>,
        seconds: Option<String>,
    ) -> Result<TimerSnapshot, String> {
        self.request(|reply| TimerCommand::SetDuration { minutes, seconds, reply })
            .await
    }

    pub async fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.request(|reply| TimerCommand::Snapshot { reply }).await
    }

    pub async fn choices(&self) -> Result<DurationChoices, String> {
        self.request(|reply| TimerCommand::Choices { reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> TimerCommand,
    ) -> Result<T, String> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(command(reply))
            .await
            .map_err(|e| format!("Timer task is not running: {}", e))?;
        rx.await
            .map_err(|e| format!("Timer task dropped the request: {}", e))
    }
}

/// Spawn the timer task and return its control handle
pub fn spawn_timer(engine: TimerEngine, input: DurationInput) -> (TimerHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let task = tokio::spawn(timer_task(engine, input, rx));
    (TimerHandle { tx }, task)
}

/// Serve control requests and ticks until every handle is dropped
async fn timer_task(
    mut engine: TimerEngine,
    mut input: DurationInput,
    mut commands: mpsc::Receiver<TimerCommand>,
) {
    info!("Starting timer task");

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => handle_command(&mut engine, &mut input, command),
                None => {
                    info!("All timer handles dropped, stopping timer task");
                    break;
                }
            },
            _ = engine.next_tick() => engine.on_tick(),
        }
    }
}

fn handle_command(engine: &mut TimerEngine, input: &mut DurationInput, command: TimerCommand) {
    let reply = match command {
        TimerCommand::Start { reply } => {
            let (minutes, seconds) = input.read();
            engine.start(minutes, seconds);
            reply
        }
        TimerCommand::TogglePause { reply } => {
            engine.toggle_pause();
            reply
        }
        TimerCommand::Reset { reply } => {
            engine.reset();
            input.restore_default();
            reply
        }
        TimerCommand::SetDuration { minutes, seconds, reply } => {
            input.set(minutes, seconds);
            reply
        }
        TimerCommand::Snapshot { reply } => reply,
        TimerCommand::Choices { reply } => {
            if reply.send(input.choices()).is_err() {
                debug!("Choices requester went away");
            }
            return;
        }
    };

    if reply.send(TimerSnapshot::capture(engine, input)).is_err() {
        debug!("Snapshot requester went away");
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    use super::{spawn_timer, TimerHandle, TimerSnapshot};
    use crate::{
        services::{SilentAudio, WatchDisplay},
        state::{DurationInput, TimerPhase},
        timer::TimerEngine,
    };

    fn spawn() -> (TimerHandle, tokio::sync::watch::Receiver<String>) {
        let (display, rx) = WatchDisplay::new("10:00".to_string());
        let engine = TimerEngine::new(600, Arc::new(display), Arc::new(SilentAudio));
        let (handle, _task) = spawn_timer(engine, DurationInput::new(10, 0, 15));
        (handle, rx)
    }

    async fn set(handle: &TimerHandle, minutes: &str, seconds: &str) -> TimerSnapshot {
        handle
            .set_duration(Some(minutes.to_string()), Some(seconds.to_string()))
            .await
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn start_reads_duration_fields() {
        let (handle, _rx) = spawn();
        set(&handle, "0", "5").await;

        let snapshot = handle.start().await.unwrap();
        assert_eq!(snapshot.phase, TimerPhase::Running);
        assert_eq!(snapshot.duration_seconds, 5);
        assert_eq!(snapshot.display, "00:05");

        sleep(Duration::from_secs(2)).await;
        assert_eq!(handle.snapshot().await.unwrap().remaining_seconds, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn paused_countdown_does_not_move() {
        let (handle, _rx) = spawn();
        set(&handle, "0", "10").await;
        handle.start().await.unwrap();

        sleep(Duration::from_secs(3)).await;
        let paused = handle.toggle_pause().await.unwrap();
        assert_eq!(paused.phase, TimerPhase::Paused);
        assert_eq!(paused.pause_label, "Continue");
        assert_eq!(paused.remaining_seconds, 7);

        sleep(Duration::from_secs(5)).await;
        let resumed = handle.toggle_pause().await.unwrap();
        assert_eq!(resumed.phase, TimerPhase::Running);
        assert_eq!(resumed.pause_label, "Pause");
        assert_eq!(resumed.remaining_seconds, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_runs_to_zero() {
        let (handle, rx) = spawn();
        set(&handle, "0", "2").await;
        handle.start().await.unwrap();

        sleep(Duration::from_secs(3)).await;
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.phase, TimerPhase::Finished);
        assert_eq!(snapshot.remaining_seconds, 0);
        assert_eq!(*rx.borrow(), "00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_restores_fields_and_silences_display() {
        let (handle, mut rx) = spawn();
        set(&handle, "1", "30").await;
        handle.start().await.unwrap();
        sleep(Duration::from_millis(1_500)).await;

        let snapshot = handle.reset().await.unwrap();
        assert_eq!(snapshot.phase, TimerPhase::Idle);
        assert_eq!(snapshot.duration_seconds, 600);
        assert_eq!(snapshot.minutes_field, "10");
        assert_eq!(snapshot.seconds_field, "0");
        assert_eq!(*rx.borrow_and_update(), "10:00");

        sleep(Duration::from_secs(5)).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn bad_fields_start_a_zero_countdown() {
        let (handle, _rx) = spawn();
        let fields = set(&handle, "ten", "99").await;
        assert_eq!(fields.minutes_field, "ten");

        let snapshot = handle.start().await.unwrap();
        assert_eq!(snapshot.duration_seconds, 0);

        sleep(Duration::from_secs(2)).await;
        assert_eq!(handle.snapshot().await.unwrap().phase, TimerPhase::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn start_after_reset_runs_the_length_reset_showed() {
        let input = DurationInput::new(2, 30, 15);
        let (display, rx) = WatchDisplay::new("02:30".to_string());
        let engine = TimerEngine::new(
            input.default_duration_seconds(),
            Arc::new(display),
            Arc::new(SilentAudio),
        );
        let (handle, _task) = spawn_timer(engine, input);

        set(&handle, "0", "5").await;
        handle.start().await.unwrap();
        let reset = handle.reset().await.unwrap();
        assert_eq!(reset.display, "02:30");
        assert_eq!(*rx.borrow(), "02:30");

        let started = handle.start().await.unwrap();
        assert_eq!(started.duration_seconds, reset.duration_seconds);
        assert_eq!(started.display, "02:30");
    }

    #[tokio::test]
    async fn choices_follow_max_minutes() {
        let (handle, _rx) = spawn();
        let choices = handle.choices().await.unwrap();
        assert_eq!(choices.minutes.len(), 16);
        assert_eq!(choices.seconds.len(), 60);
    }
}
