//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{
    engine::{RawSettings, TimerMode, TimerSettings, TimerStatus},
    state::AppState,
};
use super::responses::{ApiResponse, StatusResponse, HealthResponse};

/// Query parameters for POST /timer/reset
#[derive(Debug, Deserialize)]
pub struct ResetQuery {
    #[serde(default = "default_to_zero")]
    pub to_zero: bool,
}

fn default_to_zero() -> bool {
    true
}

/// Body for PUT /timer/mode
#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: TimerMode,
    #[serde(flatten)]
    pub settings: RawSettings,
}

/// Handle POST /timer/start - Start or resume the timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok(timer) => {
            info!("Start endpoint called - timer is {:?}", timer.status);
            let message = match timer.status {
                TimerStatus::PreStart => "Pre-start countdown armed",
                _ => "Timer running",
            };
            Ok(Json(ApiResponse::ok(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to start timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/pause - Toggle pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.pause() {
        Ok(timer) => {
            info!("Pause endpoint called - paused={}", timer.paused);
            let message = if timer.paused { "Timer paused" } else { "Timer resumed" };
            Ok(Json(ApiResponse::ok(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to pause timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/reset - Reset the timer, to zero unless `to_zero=false`
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResetQuery>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset(query.to_zero) {
        Ok(timer) => {
            info!("Reset endpoint called - to_zero={}", query.to_zero);
            Ok(Json(ApiResponse::ok("Timer reset".to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/sound - Toggle sound cues
pub async fn sound_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle_sound() {
        Ok(timer) => {
            let message = if timer.sound_enabled { "Sound enabled" } else { "Sound disabled" };
            info!("Sound endpoint called - {}", message);
            Ok(Json(ApiResponse::ok(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to toggle sound: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle PUT /timer/mode - Select a protocol and its configuration
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    let settings = TimerSettings::normalize(request.mode, &request.settings);

    match state.select_mode(request.mode, settings) {
        Ok(timer) => {
            info!("Mode endpoint called - mode={}", request.mode);
            Ok((
                StatusCode::OK,
                Json(ApiResponse::ok(format!("Mode set to {}", request.mode), timer)),
            ))
        }
        Err(e) => {
            warn!("Mode change refused: {}", e);
            // Refused: report the unchanged timer
            match state.snapshot() {
                Ok(timer) => Ok((StatusCode::CONFLICT, Json(ApiResponse::rejected(e, timer)))),
                Err(e) => {
                    error!("Failed to get timer snapshot: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
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
