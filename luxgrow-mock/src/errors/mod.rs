pub mod api;
pub mod realtime;
pub mod servo;

pub use api::ApiError;
pub use realtime::RealtimeError;
pub use servo::ServoError;

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde_json::json;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::RealtimeError(e) => (e.status_code(), e.to_string()),
            ApiError::ServoError(e) => (e.status_code(), e.to_string()),
        };

        tracing::debug!("Rejected request: {message}");

        let body = Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
