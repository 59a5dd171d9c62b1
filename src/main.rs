//! Whistle Timer - A countdown timer with start and end whistles
//! 
//! This is the main entry point for the whistle-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use whistle_timer::{
    config::Config,
    services::{describe_audio, AudioCues, CommandPlayer, SilentAudio, WatchDisplay},
    state::{AppState, DurationInput},
    api::create_router,
    tasks::spawn_timer,
    timer::TimerEngine,
    utils::{format_clock, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("whistle_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting whistle-timer v{}", env!("CARGO_PKG_VERSION"));
    config.validate().map_err(anyhow::Error::msg)?;

    // Reset restores the same fields start reads
    let input = DurationInput::new(config.minutes, config.seconds, config.max_minutes);
    let default_duration = input.default_duration_seconds();
    info!("Configuration: host={}, port={}, default={}",
          config.host, config.port, format_clock(default_duration));

    // Wire the engine to its collaborators
    let (display, display_rx) = WatchDisplay::new(format_clock(default_duration));
    let audio: Arc<dyn AudioCues> = if config.mute {
        Arc::new(SilentAudio)
    } else {
        Arc::new(CommandPlayer::new(
            config.player.clone(),
            config.start_sound.clone(),
            config.end_sound.clone(),
        ))
    };
    describe_audio(config.mute, &config.player);

    let engine = TimerEngine::new(default_duration, Arc::new(display), audio);
    let (timer, _timer_task) = spawn_timer(engine, input);

    if config.autostart {
        let snapshot = timer.start().await.map_err(anyhow::Error::msg)?;
        info!("Autostarted countdown at {}", snapshot.display);
    }

    // Create application state and HTTP router
    let state = Arc::new(AppState::new(config.port, config.host.clone(), timer, display_rx));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start    - Start or continue the countdown");
    info!("  POST /pause    - Pause or continue the countdown");
    info!("  POST /reset    - Stop and reset to the default duration");
    info!("  PUT  /duration - Set the minute and second fields");
    info!("  GET  /choices  - Selectable field values");
    info!("  GET  /status   - Current countdown and server status");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result.map_err(anyhow::Error::msg)?;
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
