use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use luxgrow_mock::app::create_app;
use luxgrow_mock::store::Store;

fn app() -> Router {
    create_app(Arc::new(Store::new(15)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn test_readings_before_any_post_are_not_found() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/realtime/lux", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);

    let (status, _) = send(&app, "GET", "/api/realtime/condition", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_condition_is_recomputed_from_latest_lux() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/realtime/lux", Some(json!({ "lux": 150.0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));

    let (status, _) = send(&app, "POST", "/api/realtime/condition", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/realtime/condition", None).await;
    assert_eq!(body["klasifikasi"], "Cahaya terlalu rendah");

    send(&app, "POST", "/api/realtime/lux", Some(json!({ "lux": 812.0 }))).await;
    send(&app, "POST", "/api/realtime/condition", Some(json!({}))).await;

    let (_, body) = send(&app, "GET", "/api/realtime/condition", None).await;
    assert_eq!(body["klasifikasi"], "Cahaya baik");
}

#[tokio::test]
async fn test_climate_roundtrip_keeps_values() {
    let app = app();

    send(
        &app,
        "POST",
        "/api/realtime/dht",
        Some(json!({ "temperature": 24.5, "humidity": 60.0 })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/realtime/dht", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["temperature"], 24.5);
    assert_eq!(body["humidity"], 60.0);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_manual_command_reaches_device_once() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/servo/command", Some(json!({ "command": "OPEN" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["angle"], 180);

    let (_, body) = send(&app, "GET", "/api/servo/command", None).await;
    assert_eq!(body["command"], "OPEN");
    assert_eq!(body["angle"], 180);
    assert_eq!(body["mode"], "manual");

    let (_, body) = send(&app, "GET", "/api/servo/command", None).await;
    assert_eq!(body, json!({}));

    let (_, body) = send(&app, "GET", "/api/servo/status", None).await;
    assert_eq!(body["mode"], "manual");
    assert_eq!(body["last_command"]["angle"], 180);
}

#[tokio::test]
async fn test_invalid_commands_are_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/servo/command",
        Some(json!({ "command": "OPEN", "angle": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);

    let (status, _) = send(&app, "POST", "/api/servo/command", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&app, "POST", "/api/servo/mode", Some(json!({ "mode": "auto" }))).await;
    let (status, _) = send(&app, "POST", "/api/servo/command", Some(json!({ "angle": 45 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_auto_mode_follows_light() {
    let app = app();

    send(&app, "POST", "/api/servo/mode", Some(json!({ "mode": "auto" }))).await;
    send(&app, "POST", "/api/realtime/lux", Some(json!({ "lux": 30000.0 }))).await;

    let (_, body) = send(&app, "GET", "/api/servo/command", None).await;
    assert_eq!(body["angle"], 0);
    assert_eq!(body["mode"], "auto");
    assert_eq!(body["reason"], "Cahaya terlalu tinggi");

    let (_, body) = send(&app, "GET", "/api/servo/status", None).await;
    assert_eq!(body, json!({ "mode": "auto", "last_command": { "angle": 0, "command": "AUTO" } }));
}
