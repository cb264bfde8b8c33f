use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use luxgrow_api::models::{ClimateReading, ConditionRequest, LuxReading, StatusResponse};

use crate::errors::ApiError;
use crate::store::Store;

#[derive(Clone)]
pub struct RealtimeState {
    pub store: Arc<Store>,
}

pub async fn create_lux(
    State(state): State<RealtimeState>,
    Json(body): Json<LuxReading>,
) -> impl IntoResponse {
    tracing::debug!("Lux reading: {}", body.lux);
    state.store.record_lux(body).await;

    Json(StatusResponse::success())
}

pub async fn get_lux(State(state): State<RealtimeState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.lux().await?))
}

pub async fn create_climate(
    State(state): State<RealtimeState>,
    Json(body): Json<ClimateReading>,
) -> impl IntoResponse {
    tracing::debug!("Climate reading: {}°C {}%", body.temperature, body.humidity);
    state.store.record_climate(body).await;

    Json(StatusResponse::success())
}

pub async fn get_climate(State(state): State<RealtimeState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.climate().await?))
}

pub async fn classify_condition(
    State(state): State<RealtimeState>,
    body: Option<Json<ConditionRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();

    Ok(Json(state.store.classify(request).await?))
}

pub async fn get_condition(State(state): State<RealtimeState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.condition().await?))
}
