mod condition;
mod realtime;
mod servo;

pub use condition::*;
pub use realtime::*;
pub use servo::*;

use serde::{Deserialize, Serialize};

/// Acknowledgement returned by write endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Operation result
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: String::from("success"),
        }
    }
}
