use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RealtimeError {
    #[error("No {0} reading yet")]
    NoReading(&'static str),

    #[error("No classification computed yet")]
    NotClassified,
}

impl RealtimeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RealtimeError::NoReading(_) => StatusCode::NOT_FOUND,
            RealtimeError::NotClassified => StatusCode::NOT_FOUND,
        }
    }
}
