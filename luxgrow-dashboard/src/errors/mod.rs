use std::fmt::Display;

/// Failure of a single request against the backend.
///
/// None of these escape a poll cycle; they are logged and turned into
/// absent values at the read boundary.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("Request to {endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Unexpected body from {endpoint}: {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn transport<E: Display>(endpoint: &str, err: E) -> Self {
        Self::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub fn status(endpoint: &str, status: u16) -> Self {
        Self::Status {
            endpoint: endpoint.to_string(),
            status,
        }
    }

    pub fn parse(endpoint: &str, source: serde_json::Error) -> Self {
        Self::Parse {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            FetchError::Transport { endpoint, .. } => endpoint,
            FetchError::Status { endpoint, .. } => endpoint,
            FetchError::Parse { endpoint, .. } => endpoint,
        }
    }
}
