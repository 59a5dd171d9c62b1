//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    state::{AppState, DurationChoices},
    tasks::TimerSnapshot,
};
use super::responses::{ApiResponse, DurationRequest, HealthResponse, StatusResponse};

/// Turn a timer task reply into an API response and remember the action
fn respond(
    state: &AppState,
    action: &str,
    message: &str,
    result: Result<TimerSnapshot, String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(timer) => {
            state.record_action(action);
            info!("{} endpoint called - timer is {}", action, timer.phase);
            Ok(Json(ApiResponse::new(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Start the countdown, or resume it if paused
///
/// A request without a JSON body starts from the current fields; a JSON body
/// that fails to parse is rejected before anything changes.
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DurationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let request = match body {
        Ok(Json(request)) => Some(request),
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(e) => {
            warn!("Rejecting start with a malformed duration body: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    if let Some(request) = request {
        if let Err(e) = state
            .timer
            .set_duration(request.minutes_field(), request.seconds_field())
            .await
        {
            error!("Failed to set duration before start: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    let result = state.timer.start().await;
    respond(&state, "start", "Countdown started", result)
}

/// Handle POST /pause - Pause or continue the countdown
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.timer.toggle_pause().await;
    respond(&state, "pause", "Pause toggled", result)
}

/// Handle POST /reset - Stop and reset to the default duration
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.timer.reset().await;
    respond(&state, "reset", "Countdown reset", result)
}

/// Handle PUT /duration - Set the minute and second fields
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state
        .timer
        .set_duration(request.minutes_field(), request.seconds_field())
        .await;
    respond(&state, "duration", "Duration fields updated", result)
}

/// Handle GET /choices - Selectable field values
pub async fn choices_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DurationChoices>, StatusCode> {
    match state.timer.choices().await {
        Ok(choices) => Ok(Json(choices)),
        Err(e) => {
            error!("Failed to get duration choices: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the countdown and server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.timer.snapshot().await {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        display: state.current_display(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
