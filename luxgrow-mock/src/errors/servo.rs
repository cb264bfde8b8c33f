use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ServoError {
    #[error("Servo is in auto mode")]
    AutoMode,

    #[error("Unknown command `{0}`")]
    UnknownCommand(String),

    #[error("Provide either a command or an angle")]
    InvalidRequest,
}

impl ServoError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServoError::AutoMode => StatusCode::CONFLICT,
            ServoError::UnknownCommand(_) => StatusCode::BAD_REQUEST,
            ServoError::InvalidRequest => StatusCode::BAD_REQUEST,
        }
    }
}
