//! Application directory paths for SearchDeck.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Data (settings, history) | `~/Library/Application Support/searchdeck/` | `~/.local/share/searchdeck/` |
//! | Config | `~/Library/Application Support/searchdeck/` | `~/.config/searchdeck/` |
//!
//! # Environment Overrides
//!
//! - `SEARCHDECK_DATA_DIR` overrides [`data_dir`]
//! - `SEARCHDECK_CONFIG_DIR` overrides [`config_dir`]

use std::path::PathBuf;

const APP_DIR: &str = "searchdeck";

/// Root for `settings.json` and `history.db`.
///
/// Resolves to `dirs::data_dir()/searchdeck/` unless `SEARCHDECK_DATA_DIR`
/// is set.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("SEARCHDECK_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/searchdeck-data"))
}

/// Directory holding `config.toml`.
///
/// Resolves to `dirs::config_dir()/searchdeck/` unless
/// `SEARCHDECK_CONFIG_DIR` is set.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("SEARCHDECK_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("/tmp/searchdeck-config"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_nonempty() {
        assert!(!data_dir().as_os_str().is_empty());
    }

    #[test]
    fn config_dir_is_nonempty() {
        assert!(!config_dir().as_os_str().is_empty());
    }

    #[test]
    fn config_file_is_inside_config_dir() {
        let file = config_file();
        assert!(file.starts_with(config_dir()));
        assert!(file.to_string_lossy().ends_with("config.toml"));
    }
}
