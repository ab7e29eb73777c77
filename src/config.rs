//! Application configuration loaded from `config.toml`.
//!
//! ```toml
//! [session]
//! endpoints = ["https://searx.example.org", "huggingface.co/spaces/owner/space"]
//! timeout_seconds = 10
//! language = "en"
//!
//! [storage]
//! data_dir = "/var/lib/searchdeck"
//! ```

use std::path::{Path, PathBuf};

use searchdeck_session::SessionConfig;
use serde::{Deserialize, Serialize};

use crate::deck_dirs;
use crate::error::{AppError, Result};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend endpoints and request behaviour.
    pub session: SessionConfig,
    /// Where settings and history are kept.
    pub storage: StorageConfig,
}

/// Location of the local stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data directory when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// The configured directory, or [`deck_dirs::data_dir`].
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(deck_dirs::data_dir)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// embedded session config fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;
        config.session.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path (see [`deck_dirs::config_file`]).
    pub fn default_config_path() -> PathBuf {
        deck_dirs::config_file()
    }

    /// Load from `explicit` if given, else from the default path.
    ///
    /// A missing default file yields [`AppConfig::default`]; a missing
    /// explicit file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file exists but is invalid, or if an
    /// explicit path does not exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let path = Self::default_config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn default_config_points_at_platform_data_dir() {
        let config = AppConfig::default();
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.storage.resolved_data_dir(), deck_dirs::data_dir());
        assert!(config.session.validate().is_ok());
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            session: SessionConfig {
                endpoints: vec![
                    "https://searx.example.org".into(),
                    "huggingface.co/spaces/owner/space".into(),
                ],
                timeout_seconds: 4,
                language: "de".into(),
                user_agent: Some("deck-test/1.0".into()),
            },
            storage: StorageConfig {
                data_dir: Some(dir.path().join("data")),
            },
        };

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nlanguage = \"fr\"\n").unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded.session.language, "fr");
        assert_eq!(loaded.session.endpoints, SessionConfig::default().endpoints);
        assert!(loaded.storage.data_dir.is_none());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();
        assert!(matches!(AppConfig::from_file(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn empty_endpoint_list_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nendpoints = []\n").unwrap();
        assert!(matches!(AppConfig::from_file(&path), Err(AppError::Session(_))));
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/searchdeck/config.toml")));
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn default_config_path_ends_with_config_toml() {
        let path = AppConfig::default_config_path();
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
