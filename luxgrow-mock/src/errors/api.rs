use super::{RealtimeError, ServoError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Realtime error: {0}")]
    RealtimeError(#[from] RealtimeError),

    #[error("Servo error: {0}")]
    ServoError(#[from] ServoError),
}
