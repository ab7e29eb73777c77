//! Command handlers shared by the CLI binary and its tests.
//!
//! Each handler drives a [`SearchController`] through the same events a
//! browser front end would fire, then renders the result as text. Handlers
//! never fail on search or storage problems: those land in the controller's
//! [`Status`] and are rendered like any other outcome.

use rand::Rng;
use searchdeck_session::storage::SettingsSlot;
use searchdeck_session::url_state::parse_query_string;
use searchdeck_session::{
    open_session, DiskController, SafeSearch, SearchController, Status, Transport,
};

use crate::config::AppConfig;
use crate::error::Result;
use crate::render;

/// Fields a `search` or `preview` invocation may set.
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub query: Option<String>,
    pub location: Option<String>,
    pub safesearch: Option<SafeSearch>,
    /// Tab id or alias (`photos`, `web`, ...).
    pub tab: Option<String>,
    pub language: Option<String>,
}

/// Changes requested by the `settings` command.
#[derive(Debug, Clone, Default)]
pub struct SettingsChange {
    pub history_enabled: Option<bool>,
    pub safesearch: Option<SafeSearch>,
    pub location: Option<String>,
}

/// Open the on-disk controller described by `config`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the session
/// cannot be opened.
pub async fn open_controller(config: &AppConfig) -> Result<DiskController> {
    let data_dir = config.storage.resolved_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), "opening session");
    Ok(open_session(&config.session, &data_dir).await?)
}

/// Whether the controller's status should make the process exit non-zero.
pub fn is_failure(status: &Status) -> bool {
    status.is_error() || *status == Status::EmptyQuery
}

/// Apply per-invocation fields to the session without saving them as
/// defaults. Only the `settings` command changes persisted settings.
fn apply_args<T, S, R>(controller: &mut SearchController<T, S, R>, args: &SearchArgs)
where
    T: Transport,
    S: SettingsSlot,
    R: Rng,
{
    let session = controller.session_mut();
    if let Some(location) = &args.location {
        session.set_location(location);
    }
    if let Some(safesearch) = args.safesearch {
        session.set_safesearch(safesearch);
    }
    if let Some(tab) = &args.tab {
        session.set_category_token(tab);
    }
    if let Some(language) = &args.language {
        session.set_language(language);
    }
    if let Some(query) = &args.query {
        session.set_query(query);
    }
}

/// `search`: restore settings, apply arguments, submit once.
pub async fn search<T, S, R>(controller: &mut SearchController<T, S, R>, args: &SearchArgs) -> String
where
    T: Transport,
    S: SettingsSlot,
    R: Rng,
{
    controller.restore_settings().await;
    apply_args(controller, args);
    match controller.search().await {
        Ok(outcome) => render::render_outcome(&outcome, controller.status()),
        Err(_) => controller.status().message(),
    }
}

/// `open`: hydrate from a shared link or raw parameters and auto-search.
pub async fn open<T, S, R>(controller: &mut SearchController<T, S, R>, link: &str) -> String
where
    T: Transport,
    S: SettingsSlot,
    R: Rng,
{
    let params = parse_query_string(link);
    match controller.load(params).await {
        Ok(Some(outcome)) => render::render_outcome(&outcome, controller.status()),
        Ok(None) => format!(
            "Nothing to search for.\nshare: ?{}",
            controller.session().shareable_query()
        ),
        Err(_) => controller.status().message(),
    }
}

/// `preview`: the request that would be sent, plus the shareable parameters.
pub async fn preview<T, S, R>(controller: &mut SearchController<T, S, R>, args: &SearchArgs) -> String
where
    T: Transport,
    S: SettingsSlot,
    R: Rng,
{
    controller.restore_settings().await;
    apply_args(controller, args);
    let session = controller.session();
    format!("request: {}\nshare:   ?{}", session.preview(), session.shareable_query())
}

/// `history`: list past searches, or clear them.
pub async fn history<T, S, R>(controller: &mut SearchController<T, S, R>, clear: bool) -> String
where
    T: Transport,
    S: SettingsSlot,
    R: Rng,
{
    if clear {
        return match controller.clear_history().await {
            Ok(0) => "History is already empty.".to_string(),
            Ok(1) => "Cleared 1 search.".to_string(),
            Ok(removed) => format!("Cleared {removed} searches."),
            Err(_) => controller.status().message(),
        };
    }
    match controller.history().await {
        Ok(entries) => render::render_history(&entries),
        Err(_) => controller.status().message(),
    }
}

/// `settings`: apply any requested changes, then show the stored record.
pub async fn settings<T, S, R>(
    controller: &mut SearchController<T, S, R>,
    change: &SettingsChange,
) -> String
where
    T: Transport,
    S: SettingsSlot,
    R: Rng,
{
    controller.restore_settings().await;
    if let Some(enabled) = change.history_enabled {
        controller.set_history_enabled(enabled).await;
    }
    if let Some(safesearch) = change.safesearch {
        controller.set_safesearch(safesearch).await;
    }
    if let Some(location) = &change.location {
        controller.set_location(location).await;
    }
    render::render_settings(&controller.session().settings())
}
