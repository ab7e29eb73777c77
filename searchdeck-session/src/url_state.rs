//! Synchronisation between session state and address-bar parameters.
//!
//! Incoming parameters (`q`, `location`, `safesearch`, `tab`) hydrate the
//! state on load. In the other direction the state serialises to a request
//! preview and to a shareable parameter string that hydrates back to the
//! same state. Neither direction touches the network or history.

use url::{form_urlencoded, Url};

use crate::category::Category;
use crate::endpoint::ResolvedEndpoint;
use crate::request::build_request_url;
use crate::types::{SafeSearch, SearchState};

/// State fields recovered from address-bar parameters.
///
/// `None` means the parameter was absent, empty, or rejected, and the
/// corresponding field keeps its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hydration {
    pub query: Option<String>,
    pub location: Option<String>,
    pub safesearch: Option<SafeSearch>,
    pub category: Option<Category>,
    /// Set when `category` matches a UI tab and should be highlighted.
    pub active_tab: Option<Category>,
}

impl Hydration {
    /// Overwrite the fields of `state` that were supplied.
    pub fn apply(&self, state: &mut SearchState) {
        if let Some(query) = &self.query {
            state.query.clone_from(query);
        }
        if let Some(location) = &self.location {
            state.location.clone_from(location);
        }
        if let Some(safesearch) = self.safesearch {
            state.safesearch = safesearch;
        }
        if let Some(category) = &self.category {
            state.category = category.clone();
        }
    }

    /// No parameter was usable.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Read `q`, `location`, `safesearch` and `tab` from a parameter set.
///
/// When a key repeats, its first occurrence wins. Unrecognised safesearch
/// values are ignored. Unknown tabs are still applied as a best-effort
/// category but are not marked active.
pub fn from_parameters<I, K, V>(params: I) -> Hydration
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut raw_q = None;
    let mut raw_location = None;
    let mut raw_safesearch = None;
    let mut raw_tab = None;

    for (key, value) in params {
        let slot = match key.as_ref() {
            "q" => &mut raw_q,
            "location" => &mut raw_location,
            "safesearch" => &mut raw_safesearch,
            "tab" => &mut raw_tab,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.as_ref().to_string());
        }
    }

    let mut hydration = Hydration {
        query: raw_q.as_deref().and_then(trimmed_non_empty),
        location: raw_location.as_deref().and_then(trimmed_non_empty),
        safesearch: raw_safesearch.as_deref().and_then(SafeSearch::parse),
        ..Hydration::default()
    };

    if let Some(tab) = raw_tab.as_deref().and_then(trimmed_non_empty) {
        let category = Category::resolve(&tab);
        if category.is_known_tab() {
            hydration.active_tab = Some(category.clone());
        } else {
            tracing::debug!(tab = %category, "unknown tab applied without highlight");
        }
        hydration.category = Some(category);
    }

    hydration
}

/// Split an address-bar value into key/value pairs.
///
/// Accepts a full URL, a `?`-prefixed query string, or a bare query string.
pub fn parse_query_string(raw: &str) -> Vec<(String, String)> {
    let raw = raw.trim();
    if raw.contains("://") {
        if let Ok(parsed) = Url::parse(raw) {
            return parsed
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
        }
    }
    let query = raw.strip_prefix('?').unwrap_or(raw);
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Human-readable request preview for the current state.
pub fn to_preview_string(state: &SearchState, endpoint: &ResolvedEndpoint) -> String {
    build_request_url(state, endpoint)
}

/// Address-bar parameters that hydrate back to `state`.
pub fn to_shareable_query(state: &SearchState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let query = state.query.trim();
    if !query.is_empty() {
        serializer.append_pair("q", query);
    }
    let location = state.location.trim();
    if !location.is_empty() {
        serializer.append_pair("location", location);
    }
    serializer.append_pair("safesearch", &state.safesearch.to_string());
    serializer.append_pair("tab", state.category.as_str());
    serializer.finish()
}

fn trimmed_non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
