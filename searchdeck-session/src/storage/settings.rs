//! Persisted user settings in a single named slot.
//!
//! The slot holds the whole [`Settings`] record as JSON. Loading never
//! fails: a missing or corrupt slot simply yields nothing and the caller
//! keeps its in-memory values.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::run_blocking;
use crate::error::{Result, SessionError};
use crate::types::Settings;

/// File name of the settings slot inside the data directory.
pub const SETTINGS_FILENAME: &str = "settings.json";

/// A single durable slot holding one serialised record.
pub trait SettingsSlot: Send + Sync {
    /// Read the stored blob. `Ok(None)` means the slot has never been written.
    fn read(&self) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Replace the stored blob.
    fn write(&self, blob: String) -> impl Future<Output = Result<()>> + Send;
}

/// Slot backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    path: PathBuf,
}

impl JsonFileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional slot inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SETTINGS_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsSlot for JsonFileSlot {
    async fn read(&self) -> Result<Option<String>> {
        let path = self.path.clone();
        run_blocking(move || match std::fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::StorageUnavailable(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        })
        .await
    }

    async fn write(&self, blob: String) -> Result<()> {
        let path = self.path.clone();
        run_blocking(move || {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SessionError::StorageUnavailable(format!(
                        "failed to create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
            std::fs::write(&path, blob).map_err(|e| {
                SessionError::StorageUnavailable(format!("failed to write {}: {e}", path.display()))
            })
        })
        .await
    }
}

/// Slot held in process memory. Used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySlot {
    blob: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-filled with `blob`, valid or not.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.blob
            .lock()
            .map_err(|_| SessionError::StorageUnavailable("settings slot poisoned".into()))
    }
}

impl SettingsSlot for MemorySlot {
    async fn read(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    async fn write(&self, blob: String) -> Result<()> {
        *self.lock()? = Some(blob);
        Ok(())
    }
}

/// Loads and saves [`Settings`] through a [`SettingsSlot`].
#[derive(Debug)]
pub struct SettingsStore<S> {
    slot: S,
}

impl<S: SettingsSlot> SettingsStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Restore the persisted record.
    ///
    /// Returns `None` when the slot is empty, unreadable, or malformed.
    pub async fn load(&self) -> Option<Settings> {
        let blob = match self.slot.read().await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::debug!("no persisted settings, keeping defaults");
                return None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "settings slot unreadable, keeping defaults");
                return None;
            }
        };

        match serde_json::from_str(&blob) {
            Ok(settings) => Some(settings),
            Err(err) => {
                tracing::warn!(error = %err, "persisted settings malformed, keeping defaults");
                None
            }
        }
    }

    /// Overwrite the slot with the complete record.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StorageUnavailable`] if the slot cannot be written.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        let blob = serde_json::to_string(settings)
            .map_err(|e| SessionError::StorageUnavailable(format!("settings encode failed: {e}")))?;
        self.slot.write(blob).await
    }
}
