//! Session configuration with sensible defaults.
//!
//! [`SessionConfig`] lists the backend deployments to rotate across and
//! controls request behaviour. It is embedded verbatim in the
//! application's TOML config file.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::types::DEFAULT_LANGUAGE;

/// Backend deployment used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://xlnk-search.hf.space/search";

/// Configuration for a search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Candidate backends: absolute URLs or `host/spaces/<owner>/<space>` slugs.
    /// One is drawn at random per search.
    pub endpoints: Vec<String>,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Interface/result language sent with every request. Empty omits it.
    pub language: String,
    /// Custom User-Agent string. If `None`, the crate name and version are sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![DEFAULT_ENDPOINT.to_string()],
            timeout_seconds: 10,
            language: DEFAULT_LANGUAGE.to_string(),
            user_agent: None,
        }
    }
}

impl SessionConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `endpoints` must not be empty and no entry may be blank
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.endpoints.is_empty() {
            return Err(SessionError::Config(
                "at least one endpoint is required".into(),
            ));
        }
        if self.endpoints.iter().any(|e| e.trim().is_empty()) {
            return Err(SessionError::Config(
                "endpoint entries must not be blank".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SessionError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
