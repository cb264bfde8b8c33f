use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::configs::Backend;
use crate::errors::FetchError;

/// Request/response plumbing to the backend.
///
/// Paths are relative to the backend root, e.g. `/api/realtime/lux`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` and return its JSON body.
    async fn get(&self, path: &str) -> Result<Value, FetchError>;

    /// POST a JSON body to `path`. The response body is not consumed.
    async fn post(&self, path: &str, body: &Value) -> Result<(), FetchError>;
}

pub fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|source| FetchError::parse(path, source))
}

pub fn encode<T: Serialize>(path: &str, body: &T) -> Result<Value, FetchError> {
    serde_json::to_value(body).map_err(|source| FetchError::parse(path, source))
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(backend: &Backend) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(backend.timeout_secs))
            .connect_timeout(Duration::from_secs(backend.connect_timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: backend.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| FetchError::transport(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(path, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(path, e))?;

        serde_json::from_slice(&body).map_err(|source| FetchError::parse(path, source))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<(), FetchError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| FetchError::transport(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(path, status.as_u16()));
        }

        Ok(())
    }
}
