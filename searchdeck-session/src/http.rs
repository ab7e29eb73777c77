//! HTTP transport for the metasearch backend.
//!
//! Provides a configured [`reqwest::Client`] and a [`Transport`] that
//! issues a single GET per search and decodes the JSON body.

use std::time::Duration;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::transport::Transport;
use crate::types::SearchResponse;

/// User-Agent sent when the config does not override it.
const DEFAULT_USER_AGENT: &str = concat!("searchdeck/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for backend requests.
///
/// The client has:
/// - Timeout from config
/// - Custom or default User-Agent
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SessionError::Network`] if the client cannot be constructed.
pub fn build_client(config: &SessionConfig) -> Result<reqwest::Client, SessionError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SessionError::Network(format!("failed to build HTTP client: {e}")))
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from session configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Network`] if the client cannot be constructed.
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<SearchResponse, SessionError> {
        tracing::trace!(url, "backend request");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SessionError::Network(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SessionError::Network(format!("backend HTTP error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| SessionError::Network(format!("response read failed: {e}")))?;

        tracing::trace!(bytes = body.len(), "backend response received");

        serde_json::from_str(&body)
            .map_err(|e| SessionError::Parse(format!("invalid search response: {e}")))
    }
}
