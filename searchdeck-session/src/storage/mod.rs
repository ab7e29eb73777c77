//! Durable local stores: user settings and search history.
//!
//! Both stores expose async operations regardless of the underlying
//! primitive. Blocking file and SQLite work runs on tokio's blocking pool.

pub mod history;
mod schema;
pub mod settings;

pub use history::HistoryStore;
pub use settings::{JsonFileSlot, MemorySlot, SettingsSlot, SettingsStore};

use crate::error::{Result, SessionError};

/// Run blocking storage work off the async executor.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| SessionError::StorageUnavailable(format!("storage task failed: {e}")))?
}
