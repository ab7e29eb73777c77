//! Core types shared across the session: state, settings, history and the
//! backend response contract.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::category::Category;
use crate::endpoint::ResolvedEndpoint;

/// Default interface/result language code.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Snippet shown when a result carries neither `content` nor `description`.
pub const MISSING_SNIPPET: &str = "No snippet available.";

/// Safesearch filter strictness understood by the backend.
///
/// Serialised as its integer level so the persisted settings record stays
/// `{ "safesearch": 1, ... }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SafeSearch {
    /// No filtering.
    Off,
    /// Moderate filtering.
    #[default]
    Moderate,
    /// Strict filtering.
    Strict,
}

impl SafeSearch {
    /// Integer level sent to the backend.
    pub fn level(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Moderate => 1,
            Self::Strict => 2,
        }
    }

    /// Parse one of the enumerated selector values (`"0"`, `"1"`, `"2"`).
    ///
    /// Anything else, including out-of-range numbers, yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "0" => Some(Self::Off),
            "1" => Some(Self::Moderate),
            "2" => Some(Self::Strict),
            _ => None,
        }
    }

    /// Returns all selector values in ascending strictness.
    pub fn all() -> &'static [SafeSearch] {
        &[Self::Off, Self::Moderate, Self::Strict]
    }
}

impl TryFrom<u8> for SafeSearch {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Off),
            1 => Ok(Self::Moderate),
            2 => Ok(Self::Strict),
            other => Err(format!("safesearch level out of range: {other}")),
        }
    }
}

impl From<SafeSearch> for u8 {
    fn from(value: SafeSearch) -> Self {
        value.level()
    }
}

impl fmt::Display for SafeSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// The live working copy of the user's search intent.
///
/// Owned by [`crate::session::SearchSession`]; everything else only ever
/// sees it by shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub location: String,
    pub safesearch: SafeSearch,
    pub language: String,
    pub category: Category,
    pub resolved_endpoint: Option<ResolvedEndpoint>,
}

impl SearchState {
    /// Empty state with the given interface language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            query: String::new(),
            location: String::new(),
            safesearch: SafeSearch::default(),
            language: language.into(),
            category: Category::all(),
            resolved_endpoint: None,
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

/// The durable projection of [`SearchState`] that survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub safesearch: SafeSearch,
    pub location: String,
    pub history_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            safesearch: SafeSearch::default(),
            location: String::new(),
            history_enabled: true,
        }
    }
}

/// One recorded search. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub query: String,
    pub category: Category,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// JSON body returned by the metasearch backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Result items; absent or `null` is treated as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<ResultItem>,
    /// Alternative queries offered by the backend.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub suggestions: Vec<String>,
    /// Backend's estimate of the total hit count, when reported.
    #[serde(default)]
    pub number_of_results: Option<f64>,
    /// Seconds the backend spent on the search, when reported.
    #[serde(default)]
    pub search_time: Option<f64>,
}

impl SearchResponse {
    /// Reported hit count, or the number of returned items when the backend
    /// omits it. A reported count of zero counts as omitted.
    pub fn total_results(&self) -> u64 {
        match self.number_of_results {
            Some(n) if n.is_finite() && n >= 1.0 => n.round() as u64,
            _ => self.results.len() as u64,
        }
    }
}

/// A single result item. Every field is optional; the accessor methods
/// apply the display fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pretty_url: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub img_src: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnail_src: Option<String>,
}

impl ResultItem {
    /// Link target, or an empty string when the backend omitted it.
    pub fn link(&self) -> &str {
        non_empty(&self.url).unwrap_or("")
    }

    /// `title`, falling back to `url`.
    pub fn display_title(&self) -> &str {
        non_empty(&self.title).unwrap_or_else(|| self.link())
    }

    /// `pretty_url`, falling back to `url`.
    pub fn display_url(&self) -> &str {
        non_empty(&self.pretty_url).unwrap_or_else(|| self.link())
    }

    /// `content`, then `description`, then a fixed placeholder.
    pub fn snippet(&self) -> &str {
        non_empty(&self.content)
            .or_else(|| non_empty(&self.description))
            .unwrap_or(MISSING_SNIPPET)
    }

    /// `img_src`, then `thumbnail`, then `thumbnail_src`.
    pub fn thumbnail_url(&self) -> Option<&str> {
        non_empty(&self.img_src)
            .or_else(|| non_empty(&self.thumbnail))
            .or_else(|| non_empty(&self.thumbnail_src))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
