//! Event-driven orchestration of session, transport and stores.
//!
//! [`SearchController`] is what a front end talks to. Each public method
//! corresponds to one UI event (page load, input change, search submit,
//! history request). Failures never escape as panics: they update
//! [`Status`] and, where the caller needs to branch, come back as errors.

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::Result;
use crate::session::{PendingSearch, SearchOutcome, SearchSession};
use crate::status::Status;
use crate::storage::{HistoryStore, SettingsSlot, SettingsStore};
use crate::transport::Transport;
use crate::types::{HistoryEntry, SafeSearch, SearchResponse};

/// Drives one search session.
#[derive(Debug)]
pub struct SearchController<T, S, R = StdRng> {
    session: SearchSession<R>,
    transport: T,
    settings: SettingsStore<S>,
    history: HistoryStore,
    status: Status,
}

impl<T, S, R> SearchController<T, S, R>
where
    T: Transport,
    S: SettingsSlot,
    R: Rng,
{
    pub fn new(
        session: SearchSession<R>,
        transport: T,
        settings: SettingsStore<S>,
        history: HistoryStore,
    ) -> Self {
        history.set_enabled(session.history_enabled());
        Self {
            session,
            transport,
            settings,
            history,
            status: Status::Idle,
        }
    }

    pub fn session(&self) -> &SearchSession<R> {
        &self.session
    }

    /// Mutable access for one-off overrides.
    ///
    /// Changes made here are not persisted as settings, and the history
    /// gate is not resynchronised; use [`set_history_enabled`](Self::set_history_enabled)
    /// for that.
    pub fn session_mut(&mut self) -> &mut SearchSession<R> {
        &mut self.session
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn history_store(&self) -> &HistoryStore {
        &self.history
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn settings_store(&self) -> &SettingsStore<S> {
        &self.settings
    }

    /// Restore persisted settings into the session.
    ///
    /// Returns `true` if a stored record was applied.
    pub async fn restore_settings(&mut self) -> bool {
        match self.settings.load().await {
            Some(settings) => {
                self.session.apply_settings(&settings);
                self.history.set_enabled(settings.history_enabled);
                true
            }
            None => false,
        }
    }

    /// Page load: restore settings, hydrate from parameters, and run one
    /// search if the hydrated query is non-empty.
    ///
    /// Returns the auto-search outcome, or `None` when no search was due.
    ///
    /// # Errors
    ///
    /// Propagates the auto-search failure ([`crate::SessionError::Network`] or
    /// [`crate::SessionError::Parse`]); the status line is already updated.
    pub async fn load<I, K, V>(&mut self, params: I) -> Result<Option<SearchOutcome>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.restore_settings().await;
        if self.session.hydrate(params) {
            self.search().await.map(Some)
        } else {
            Ok(None)
        }
    }

    /// Submit the current state as a search.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::EmptyQuery`] without issuing a request, or the
    /// transport error for the latest search.
    pub async fn search(&mut self) -> Result<SearchOutcome> {
        let pending = self.begin_search()?;
        let fetched = self.transport.fetch(&pending.url).await;
        self.complete_search(&pending, fetched).await
    }

    /// First half of [`search`](Self::search), for callers that run the
    /// request themselves.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::EmptyQuery`] when there is nothing to search for.
    pub fn begin_search(&mut self) -> Result<PendingSearch> {
        match self.session.begin_search() {
            Ok(pending) => {
                self.status = Status::Searching;
                Ok(pending)
            }
            Err(err) => {
                self.status = Status::from_error(&err);
                Err(err)
            }
        }
    }

    /// Second half of [`search`](Self::search): classify the response,
    /// update the status line and record history.
    ///
    /// Responses and failures belonging to an older generation are
    /// discarded without touching the status line or history.
    ///
    /// # Errors
    ///
    /// Returns the transport error if `fetched` failed for the latest search.
    pub async fn complete_search(
        &mut self,
        pending: &PendingSearch,
        fetched: Result<SearchResponse>,
    ) -> Result<SearchOutcome> {
        let response = match fetched {
            Ok(response) => response,
            Err(err) => {
                if !self.session.is_current(pending.generation) {
                    tracing::debug!(generation = pending.generation, "ignoring stale failure");
                    return Ok(SearchOutcome::Discarded);
                }
                tracing::warn!(endpoint = %pending.endpoint, error = %err, "search failed");
                self.status = Status::from_error(&err);
                return Err(err);
            }
        };

        let outcome = self.session.finish_search(pending, response);
        match &outcome {
            SearchOutcome::Results(response) => {
                self.status = Status::Loaded(response.results.len());
            }
            SearchOutcome::Empty => self.status = Status::NoResults,
            SearchOutcome::Discarded => return Ok(outcome),
        }
        self.record_history(pending).await;
        Ok(outcome)
    }

    /// Input-change hook: refresh the status, persist settings and return
    /// the request preview.
    pub async fn on_input_changed(&mut self) -> String {
        if self.session.state().query.trim().is_empty() {
            self.status = Status::Idle;
        }
        self.persist_settings().await;
        self.session.preview()
    }

    pub async fn set_query(&mut self, query: &str) -> String {
        self.session.set_query(query);
        self.on_input_changed().await
    }

    pub async fn set_location(&mut self, location: &str) -> String {
        self.session.set_location(location);
        self.on_input_changed().await
    }

    pub async fn set_safesearch(&mut self, safesearch: SafeSearch) -> String {
        self.session.set_safesearch(safesearch);
        self.on_input_changed().await
    }

    pub async fn set_language(&mut self, language: &str) -> String {
        self.session.set_language(language);
        self.on_input_changed().await
    }

    pub async fn select_tab(&mut self, tab: &str) -> String {
        self.session.select_tab(tab);
        self.on_input_changed().await
    }

    /// Set a category from free text (alias-resolved).
    pub async fn set_category(&mut self, token: &str) -> String {
        self.session.set_category_token(token);
        self.on_input_changed().await
    }

    /// Toggle history recording and persist the choice.
    pub async fn set_history_enabled(&mut self, enabled: bool) {
        self.session.set_history_enabled(enabled);
        self.history.set_enabled(enabled);
        self.persist_settings().await;
    }

    /// Past searches, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::HistoryUnavailable`] if the store cannot be read.
    pub async fn history(&mut self) -> Result<Vec<HistoryEntry>> {
        self.history.list().await.inspect_err(|err| {
            tracing::warn!(error = %err, "history read failed");
            self.status = Status::HistoryUnavailable;
        })
    }

    /// Delete all history entries.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::StorageUnavailable`] if the store cannot be written.
    pub async fn clear_history(&mut self) -> Result<usize> {
        self.history.clear().await.inspect_err(|err| {
            self.status = Status::from_error(err);
        })
    }

    async fn record_history(&self, pending: &PendingSearch) {
        if let Err(err) = self.history.add(&pending.query, &pending.category).await {
            tracing::warn!(error = %err, "failed to record history entry");
        }
    }

    async fn persist_settings(&self) {
        let settings = self.session.settings();
        if let Err(err) = self.settings.save(&settings).await {
            tracing::warn!(error = %err, "failed to persist settings");
        }
    }
}
