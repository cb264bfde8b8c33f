use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use crate::handles::*;
use crate::store::Store;

pub fn create_app(store: Arc<Store>) -> Router {
    let realtime = Router::new()
        .route("/lux", get(get_lux).post(create_lux))
        .route("/dht", get(get_climate).post(create_climate))
        .route("/condition", get(get_condition).post(classify_condition))
        .with_state(RealtimeState {
            store: store.clone(),
        });

    let servo = Router::new()
        .route("/mode", post(set_servo_mode))
        .route("/command", get(take_servo_command).post(create_servo_command))
        .route("/status", get(get_servo_status))
        .with_state(ServoState {
            store: store.clone(),
        });

    Router::new()
        .nest("/api/realtime", realtime)
        .nest("/api/servo", servo)
        .layer(CorsLayer::permissive())
}
