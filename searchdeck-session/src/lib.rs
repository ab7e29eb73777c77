//! # searchdeck-session
//!
//! The search session controller behind SearchDeck.
//!
//! This crate decides *what* to request from a SearXNG-style metasearch
//! backend, *where* to send it, and *what* to remember afterwards. It does
//! not rank, filter, or cache results.
//!
//! ## Design
//!
//! - Query text and the location hint compose into one `q` parameter
//! - Category aliases ("photos", "web") resolve to canonical ids
//! - Hosting-slug and bare-host endpoints normalise to `.../search`; one is
//!   drawn at random per search to spread load across deployments
//! - Address-bar parameters hydrate the session and auto-trigger one search
//! - Settings persist as a JSON record; history lives in a versioned SQLite table
//! - A request-generation token drops responses that arrive after a newer search
//!
//! ## Privacy
//!
//! - Query text is logged only at trace level
//! - History recording can be switched off; clearing ignores the switch

pub mod category;
pub mod config;
pub mod controller;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod query;
pub mod request;
pub mod session;
pub mod status;
pub mod storage;
pub mod transport;
pub mod types;
pub mod url_state;

use std::path::Path;

pub use category::Category;
pub use config::SessionConfig;
pub use controller::SearchController;
pub use endpoint::{EndpointResolver, ResolvedEndpoint};
pub use error::{Result, SessionError};
pub use http::HttpTransport;
pub use session::{PendingSearch, SearchOutcome, SearchSession};
pub use status::Status;
pub use storage::{HistoryStore, JsonFileSlot, SettingsStore};
pub use transport::Transport;
pub use types::{HistoryEntry, ResultItem, SafeSearch, SearchResponse, SearchState, Settings};

/// A controller wired to the HTTP backend and on-disk stores.
pub type DiskController = SearchController<HttpTransport, JsonFileSlot>;

/// Open a session whose settings and history live under `data_dir`.
///
/// Settings are not restored yet; call [`SearchController::load`] (or
/// [`SearchController::restore_settings`]) next.
///
/// # Errors
///
/// Returns [`SessionError::Config`] if `config` is invalid,
/// [`SessionError::Network`] if the HTTP client cannot be built, or
/// [`SessionError::StorageUnavailable`] if the history database cannot be opened.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> searchdeck_session::Result<()> {
/// let config = searchdeck_session::SessionConfig::default();
/// let mut controller =
///     searchdeck_session::open_session(&config, std::path::Path::new("/tmp/deck")).await?;
/// controller.load([("q", "weather"), ("tab", "news")]).await?;
/// println!("{}", controller.status());
/// # Ok(())
/// # }
/// ```
pub async fn open_session(config: &SessionConfig, data_dir: &Path) -> Result<DiskController> {
    let session = SearchSession::from_config(config)?;
    let transport = HttpTransport::new(config)?;
    let settings = SettingsStore::new(JsonFileSlot::in_dir(data_dir));
    let history = HistoryStore::open_in_dir(data_dir).await?;
    Ok(SearchController::new(session, transport, settings, history))
}
