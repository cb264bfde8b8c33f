use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use luxgrow_api::models::{CommandRequest, ModeRequest};
use serde_json::json;

use crate::errors::ApiError;
use crate::store::Store;

#[derive(Clone)]
pub struct ServoState {
    pub store: Arc<Store>,
}

pub async fn set_servo_mode(
    State(state): State<ServoState>,
    Json(body): Json<ModeRequest>,
) -> impl IntoResponse {
    tracing::info!("Servo mode set to {}", body.mode);

    Json(state.store.set_mode(body.mode).await)
}

pub async fn create_servo_command(
    State(state): State<ServoState>,
    Json(body): Json<CommandRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = state.store.command(body).await?;
    tracing::info!("Servo command {:?} to {}°", command.command, command.angle);

    Ok(Json(command))
}

/// Polled by the servo node. Answers `{}` when there is nothing to do.
pub async fn take_servo_command(State(state): State<ServoState>) -> impl IntoResponse {
    match state.store.take_pending().await {
        Some(command) => Json(json!(command)),
        None => Json(json!({})),
    }
}

pub async fn get_servo_status(State(state): State<ServoState>) -> impl IntoResponse {
    Json(state.store.status().await)
}
