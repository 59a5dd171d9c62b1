use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use whistle_timer::{
    create_router,
    services::{SilentAudio, WatchDisplay},
    spawn_timer,
    state::{AppState, DurationInput},
    TimerEngine,
};

fn app() -> Router {
    let (display, display_rx) = WatchDisplay::new("10:00".to_string());
    let engine = TimerEngine::new(600, Arc::new(display), Arc::new(SilentAudio));
    let (timer, _task) = spawn_timer(engine, DurationInput::new(10, 0, 15));
    let state = AppState::new(20554, "127.0.0.1".to_string(), timer, display_rx);
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, json: Option<String>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match json {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json)
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body.map(|json| json.to_string())).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn start_with_body_uses_requested_duration() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/start",
        Some(json!({"minutes": "1", "seconds": 30})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["durationSeconds"], 90);
    assert_eq!(body["timer"]["display"], "01:30");
}

#[tokio::test(start_paused = true)]
async fn start_without_body_reads_default_fields() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["durationSeconds"], 600);
}

#[tokio::test(start_paused = true)]
async fn pause_continue_and_reset_flow() {
    let app = app();
    call(&app, Method::PUT, "/duration", Some(json!({"minutes": 0, "seconds": 10}))).await;
    call(&app, Method::POST, "/start", None).await;

    tokio::time::sleep(Duration::from_secs(3)).await;
    let (_, paused) = call(&app, Method::POST, "/pause", None).await;
    assert_eq!(paused["status"], "paused");
    assert_eq!(paused["timer"]["pauseLabel"], "Continue");
    assert_eq!(paused["timer"]["remainingSeconds"], 7);

    tokio::time::sleep(Duration::from_secs(5)).await;
    let (_, resumed) = call(&app, Method::POST, "/pause", None).await;
    assert_eq!(resumed["status"], "running");
    assert_eq!(resumed["timer"]["remainingSeconds"], 7);

    let (_, reset) = call(&app, Method::POST, "/reset", None).await;
    assert_eq!(reset["status"], "idle");
    assert_eq!(reset["timer"]["display"], "10:00");
    assert_eq!(reset["timer"]["minutesField"], "10");

    let (_, status) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(status["display"], "10:00");
    assert_eq!(status["lastAction"], "reset");
}

#[tokio::test(start_paused = true)]
async fn status_shows_finished_countdown() {
    let app = app();
    call(&app, Method::POST, "/start", Some(json!({"minutes": 0, "seconds": 2}))).await;

    tokio::time::sleep(Duration::from_secs(3)).await;
    let (status, body) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "finished");
    assert_eq!(body["display"], "00:00");
}

#[tokio::test]
async fn pause_before_start_is_ignored() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/pause", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["pauseLabel"], "Pause");
}

#[tokio::test]
async fn choices_list_both_fields() {
    let app = app();
    let (_, body) = call(&app, Method::GET, "/choices", None).await;
    assert_eq!(body["minutes"].as_array().map(Vec::len), Some(16));
    assert_eq!(body["seconds"][59]["label"], "59");
}

#[tokio::test(start_paused = true)]
async fn malformed_start_body_is_rejected_without_starting() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/start", Some("{\"minutes\": 1,".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, Method::GET, "/status", None).await;
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["lastAction"], Value::Null);
}
