//! The search session: owned state plus pure state transitions.
//!
//! [`SearchSession`] owns the [`SearchState`], the endpoint resolver and a
//! monotonically increasing request generation. Nothing here performs I/O;
//! [`crate::controller::SearchController`] drives the transport and stores.
//!
//! # Stale responses
//!
//! Every [`begin_search`](SearchSession::begin_search) bumps the generation.
//! A response is only accepted by [`finish_search`](SearchSession::finish_search)
//! if it belongs to the latest generation, so a slow earlier request can
//! never overwrite the results of a later one.

use rand::rngs::StdRng;
use rand::Rng;

use crate::category::Category;
use crate::config::SessionConfig;
use crate::endpoint::{EndpointResolver, ResolvedEndpoint};
use crate::error::Result;
use crate::query::compose_for_submission;
use crate::request::build_request_url;
use crate::types::{SafeSearch, SearchResponse, SearchState, Settings};
use crate::url_state::{self, Hydration};

/// A request that has been built and is waiting for its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    /// Generation token; compared against the session on completion.
    pub generation: u64,
    /// Fully-qualified request URL.
    pub url: String,
    /// Composed query text (query box plus location).
    pub query: String,
    /// Category at submission time.
    pub category: Category,
    /// Endpoint drawn for this request.
    pub endpoint: ResolvedEndpoint,
}

/// Result of completing a pending search.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The backend returned at least one item.
    Results(SearchResponse),
    /// The backend answered with an empty result set.
    Empty,
    /// A newer search was started; this response must not be rendered.
    Discarded,
}

impl SearchOutcome {
    /// Whether the response was accepted (rendered and eligible for history).
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Discarded)
    }
}

/// The authoritative in-memory search session.
#[derive(Debug)]
pub struct SearchSession<R = StdRng> {
    state: SearchState,
    resolver: EndpointResolver<R>,
    active_tab: Option<Category>,
    history_enabled: bool,
    generation: u64,
}

impl SearchSession<StdRng> {
    /// Build a session from configuration with an entropy-seeded resolver.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::Config`] if the configuration is invalid.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let resolver = EndpointResolver::from_entropy(&config.endpoints)?;
        Ok(Self::with_resolver(resolver, &config.language))
    }
}

impl<R: Rng> SearchSession<R> {
    /// Build a session with an injected random source.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::Config`] if the configuration is invalid.
    pub fn with_rng(config: &SessionConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let resolver = EndpointResolver::new(&config.endpoints, rng)?;
        Ok(Self::with_resolver(resolver, &config.language))
    }

    fn with_resolver(resolver: EndpointResolver<R>, language: &str) -> Self {
        let state = SearchState::new(language);
        Self {
            active_tab: Some(state.category.clone()),
            state,
            resolver,
            history_enabled: Settings::default().history_enabled,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn resolver(&self) -> &EndpointResolver<R> {
        &self.resolver
    }

    /// The tab to highlight, if the current category has one.
    pub fn active_tab(&self) -> Option<&Category> {
        self.active_tab.as_ref()
    }

    /// Latest generation handed out by [`begin_search`](Self::begin_search).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `generation` is still the latest search.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn history_enabled(&self) -> bool {
        self.history_enabled
    }

    /// The durable subset of the session.
    pub fn settings(&self) -> Settings {
        Settings {
            safesearch: self.state.safesearch,
            location: self.state.location.clone(),
            history_enabled: self.history_enabled,
        }
    }

    /// Apply a restored settings record.
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.state.safesearch = settings.safesearch;
        self.state.location.clone_from(&settings.location);
        self.history_enabled = settings.history_enabled;
    }

    pub fn set_query(&mut self, query: &str) {
        self.state.query = query.to_string();
    }

    pub fn set_location(&mut self, location: &str) {
        self.state.location = location.to_string();
    }

    pub fn set_safesearch(&mut self, safesearch: SafeSearch) {
        self.state.safesearch = safesearch;
    }

    pub fn set_language(&mut self, language: &str) {
        self.state.language = language.trim().to_string();
    }

    pub fn set_history_enabled(&mut self, enabled: bool) {
        self.history_enabled = enabled;
    }

    /// Select a category from a tab control.
    pub fn select_tab(&mut self, tab: &str) {
        self.set_category(Category::from_tab(tab));
    }

    /// Select a category from free text, resolving aliases.
    pub fn set_category_token(&mut self, token: &str) {
        self.set_category(Category::resolve(token));
    }

    fn set_category(&mut self, category: Category) {
        self.active_tab = category.is_known_tab().then(|| category.clone());
        self.state.category = category;
    }

    /// Hydrate from address-bar parameters.
    ///
    /// Returns `true` when the resulting query is non-empty and a search
    /// should be triggered.
    pub fn hydrate<I, K, V>(&mut self, params: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let hydration = url_state::from_parameters(params);
        self.apply_hydration(&hydration);
        !self.state.query.trim().is_empty()
    }

    /// Apply an already-parsed [`Hydration`].
    pub fn apply_hydration(&mut self, hydration: &Hydration) {
        hydration.apply(&mut self.state);
        if hydration.category.is_some() {
            self.active_tab.clone_from(&hydration.active_tab);
        }
        tracing::debug!(
            category = %self.state.category,
            safesearch = %self.state.safesearch,
            "session hydrated"
        );
    }

    /// Request preview for the current state. No network, no history.
    pub fn preview(&self) -> String {
        url_state::to_preview_string(&self.state, self.resolver.preview())
    }

    /// Address-bar parameters that reproduce the current state.
    pub fn shareable_query(&self) -> String {
        url_state::to_shareable_query(&self.state)
    }

    /// Start a search: reset the endpoint memo, compose, draw an endpoint,
    /// bump the generation and build the URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SessionError::EmptyQuery`] when there is no query
    /// text; the generation is left unchanged in that case.
    pub fn begin_search(&mut self) -> Result<PendingSearch> {
        self.resolver.reset();
        self.state.resolved_endpoint = None;

        let query = compose_for_submission(&self.state.query, &self.state.location)?;

        let endpoint = self.resolver.select().clone();
        self.state.resolved_endpoint = Some(endpoint.clone());
        self.generation += 1;

        let url = build_request_url(&self.state, &endpoint);
        tracing::trace!(query = %query, "search composed");
        tracing::debug!(generation = self.generation, endpoint = %endpoint, "search started");

        Ok(PendingSearch {
            generation: self.generation,
            url,
            query,
            category: self.state.category.clone(),
            endpoint,
        })
    }

    /// Accept or discard the response for `pending`.
    pub fn finish_search(&self, pending: &PendingSearch, response: SearchResponse) -> SearchOutcome {
        if !self.is_current(pending.generation) {
            tracing::debug!(
                stale = pending.generation,
                current = self.generation,
                "discarding stale response"
            );
            return SearchOutcome::Discarded;
        }
        if response.results.is_empty() {
            SearchOutcome::Empty
        } else {
            SearchOutcome::Results(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::types::ResultItem;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn session(endpoints: &[&str]) -> SearchSession<StdRng> {
        let config = SessionConfig {
            endpoints: endpoints.iter().map(|e| (*e).to_string()).collect(),
            ..Default::default()
        };
        SearchSession::with_rng(&config, StdRng::seed_from_u64(3)).expect("valid config")
    }

    fn one_result() -> SearchResponse {
        SearchResponse {
            results: vec![ResultItem {
                url: Some("https://a.example".into()),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SessionConfig {
            endpoints: vec![],
            ..Default::default()
        };
        assert!(SearchSession::with_rng(&config, StdRng::seed_from_u64(1)).is_err());
        assert!(SearchSession::from_config(&config).is_err());
    }

    #[test]
    fn hydration_triggers_search_for_query() {
        let mut s = session(&["https://a.example"]);
        let auto = s.hydrate([("q", "weather"), ("tab", "videos"), ("safesearch", "1")]);
        assert!(auto);
        assert_eq!(s.state().query, "weather");
        assert_eq!(s.state().category.as_str(), "videos");
        assert_eq!(s.state().safesearch, SafeSearch::Moderate);
        assert_eq!(s.active_tab().map(Category::as_str), Some("videos"));
    }

    #[test]
    fn hydration_without_query_does_not_search() {
        let mut s = session(&["https://a.example"]);
        assert!(!s.hydrate([("location", "paris")]));
        assert_eq!(s.state().location, "paris");
    }

    #[test]
    fn unknown_tab_clears_highlight() {
        let mut s = session(&["https://a.example"]);
        assert_eq!(s.active_tab().map(Category::as_str), Some("all"));
        s.hydrate([("tab", "science")]);
        assert_eq!(s.state().category.as_str(), "science");
        assert!(s.active_tab().is_none());
    }

    #[test]
    fn settings_projection_round_trips() {
        let mut s = session(&["https://a.example"]);
        let settings = Settings {
            safesearch: SafeSearch::Off,
            location: "Kyoto".into(),
            history_enabled: false,
        };
        s.apply_settings(&settings);
        assert_eq!(s.settings(), settings);
        assert!(!s.history_enabled());
    }

    #[test]
    fn empty_query_refused_without_bumping_generation() {
        let mut s = session(&["https://a.example"]);
        s.set_location("paris");
        let err = s.begin_search().unwrap_err();
        assert!(matches!(err, SessionError::EmptyQuery));
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn begin_search_builds_url_and_records_endpoint() {
        let mut s = session(&["https://a.example/"]);
        s.set_query("cats");
        s.set_location("paris");
        s.select_tab("images");
        let pending = s.begin_search().expect("search");
        assert_eq!(pending.generation, 1);
        assert_eq!(pending.query, "cats paris");
        assert_eq!(pending.category.as_str(), "images");
        assert!(pending
            .url
            .starts_with("https://a.example/search?q=cats+paris&format=json"));
        assert_eq!(s.state().resolved_endpoint.as_ref(), Some(&pending.endpoint));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut s = session(&["https://a.example"]);
        s.set_query("slow");
        let first = s.begin_search().expect("first");
        s.set_query("fast");
        let second = s.begin_search().expect("second");

        assert!(matches!(
            s.finish_search(&second, one_result()),
            SearchOutcome::Results(_)
        ));
        assert!(matches!(
            s.finish_search(&first, one_result()),
            SearchOutcome::Discarded
        ));
    }

    #[test]
    fn empty_response_is_empty_outcome() {
        let mut s = session(&["https://a.example"]);
        s.set_query("nothing");
        let pending = s.begin_search().expect("search");
        let outcome = s.finish_search(&pending, SearchResponse::default());
        assert!(matches!(outcome, SearchOutcome::Empty));
        assert!(outcome.is_accepted());
    }

    #[test]
    fn consecutive_searches_rotate_endpoints() {
        let mut s = session(&["https://a.example", "https://b.example"]);
        s.set_query("rotate");
        let mut seen = HashSet::new();
        for _ in 0..50 {
            let pending = s.begin_search().expect("search");
            seen.insert(pending.endpoint.as_str().to_string());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn preview_has_no_side_effects() {
        let mut s = session(&["https://a.example"]);
        s.set_location("paris");
        let preview = s.preview();
        assert!(preview.contains("q=paris"));
        assert_eq!(s.generation(), 0);
        assert!(s.state().resolved_endpoint.is_none());
    }

    #[test]
    fn category_token_resolves_alias() {
        let mut s = session(&["https://a.example"]);
        s.set_category_token("Pics");
        assert_eq!(s.state().category.as_str(), "images");
        assert_eq!(s.active_tab().map(Category::as_str), Some("images"));
    }

    #[test]
    fn shareable_query_reflects_state() {
        let mut s = session(&["https://a.example"]);
        s.set_query("rust");
        s.set_safesearch(SafeSearch::Strict);
        s.select_tab("news");
        assert_eq!(s.shareable_query(), "q=rust&safesearch=2&tab=news");
    }
}
