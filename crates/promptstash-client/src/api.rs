//! Thin typed wrapper over the Prompt Save REST API.

use std::time::Duration;

use promptstash_types::{CreatePromptRequest, Prompt, StatusResponse};

use crate::error::ClientError;

/// HTTP client for one server instance.
///
/// Cheap to clone; every clone shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` with a per-request `timeout`.
    ///
    /// A trailing slash on the base URL is tolerated and trimmed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("promptstash-client/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    /// Build a client from environment variables.
    ///
    /// * `PROMPTSTASH_API_URL` – server base URL (default `http://127.0.0.1:5001`).
    /// * `PROMPTSTASH_HTTP_TIMEOUT_SECS` – per-request timeout (default `10`).
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var("PROMPTSTASH_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5001".to_owned());
        let timeout_secs: u64 = std::env::var("PROMPTSTASH_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        Self::new(base_url, Duration::from_secs(timeout_secs))
    }

    /// Probe `GET /api/status`.
    ///
    /// The server sends `{"dbConnected": false}` with HTTP 500 during an
    /// outage, so the body is parsed regardless of the status code; only a
    /// transport-level failure is an `Err`.
    pub async fn status(&self) -> Result<bool, ClientError> {
        let url = format!("{}/api/status", self.base_url);
        let response = self.http.get(&url).send().await?;
        let status: StatusResponse = response.json().await?;
        Ok(status.db_connected)
    }

    /// Fetch all prompts, newest first.
    pub async fn list(&self) -> Result<Vec<Prompt>, ClientError> {
        let url = format!("{}/api/prompts", self.base_url);
        let response = self.http.get(&url).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Save a new prompt and return the stored row.
    pub async fn create(&self, content: &str) -> Result<Prompt, ClientError> {
        let url = format!("{}/api/prompts", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&CreatePromptRequest { content: content.to_owned() })
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Delete the prompt with `id`.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{}/api/prompts/{id}", self.base_url);
        let response = self.http.delete(&url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Map non-2xx responses to [`ClientError::Api`], capturing the
    /// plain-text error body the server sends.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(ClientError::Api { status, message })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let api = ApiClient::new("http://localhost:5001/", Duration::from_secs(1))
            .expect("client should build");
        assert_eq!(api.base_url, "http://localhost:5001");
    }

    #[test]
    fn from_env_falls_back_to_defaults() {
        // The variables are unlikely to be set in the test environment; the
        // assertion only cares that construction succeeds either way.
        assert!(ApiClient::from_env().is_ok());
    }
}
