//! Backend endpoint normalisation and selection.
//!
//! Candidates arrive either as absolute URLs (`https://searx.example.org/`)
//! or as hosting slugs (`huggingface.co/spaces/<owner>/<space>`). Both are
//! normalised to a request base ending in [`SEARCH_PATH`]. When several
//! equivalent deployments are configured, one is drawn uniformly at random
//! per search to spread load across them.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use url::Url;

use crate::error::{Result, SessionError};

/// Path segment every normalised endpoint ends with.
pub const SEARCH_PATH: &str = "/search";

/// Domain under which hosting-slug spaces are served.
pub const PLATFORM_DOMAIN: &str = "hf.space";

/// A normalised, fully-qualified request base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedEndpoint {
    normalized_url: String,
}

impl ResolvedEndpoint {
    /// Normalise a raw candidate specification.
    pub fn from_spec(spec: &str) -> Self {
        Self {
            normalized_url: normalize(spec),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.normalized_url
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized_url)
    }
}

/// Normalise an endpoint specification into a request base URL.
///
/// 1. Hosting slugs (`[scheme://]host/spaces/<owner>/<space>`) become
///    `https://<owner>-<space>.hf.space/search`.
/// 2. Anything else has trailing slashes stripped and [`SEARCH_PATH`]
///    appended unless it already ends with it.
///
/// Normalising an already-normalised endpoint returns it unchanged.
///
/// # Examples
///
/// ```
/// use searchdeck_session::endpoint::normalize;
///
/// assert_eq!(
///     normalize("https://huggingface.co/spaces/owner/space"),
///     "https://owner-space.hf.space/search"
/// );
/// assert_eq!(normalize("https://searx.example.org/"), "https://searx.example.org/search");
/// ```
pub fn normalize(spec: &str) -> String {
    let spec = spec.trim();

    if let Some((owner, space)) = parse_hosting_slug(spec) {
        return format!(
            "https://{}-{}.{PLATFORM_DOMAIN}{SEARCH_PATH}",
            subdomain_label(&owner),
            subdomain_label(&space)
        );
    }

    let base = spec.trim_end_matches('/');
    if base.ends_with(SEARCH_PATH) {
        base.to_string()
    } else {
        format!("{base}{SEARCH_PATH}")
    }
}

/// Extract `(owner, space)` when `spec` has the path `/spaces/<owner>/<space>`.
fn parse_hosting_slug(spec: &str) -> Option<(String, String)> {
    let parsed = if spec.contains("://") {
        Url::parse(spec).ok()?
    } else {
        Url::parse(&format!("https://{spec}")).ok()?
    };
    parsed.host_str()?;

    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["spaces", owner, space] => Some(((*owner).to_string(), (*space).to_string())),
        _ => None,
    }
}

/// Subdomain-safe form of a slug component.
fn subdomain_label(component: &str) -> String {
    component
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' || c == '.' { '-' } else { c })
        .collect()
}

/// Picks one normalised endpoint per search and remembers it until reset.
///
/// The random source is injected so tests can use a fixed seed.
#[derive(Debug)]
pub struct EndpointResolver<R = StdRng> {
    candidates: Vec<ResolvedEndpoint>,
    rng: R,
    current: Option<ResolvedEndpoint>,
}

impl EndpointResolver<StdRng> {
    /// Build a resolver seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if `specs` is empty.
    pub fn from_entropy<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        Self::new(specs, StdRng::from_entropy())
    }
}

impl<R: Rng> EndpointResolver<R> {
    /// Normalise every candidate up front.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if `specs` is empty.
    pub fn new<S: AsRef<str>>(specs: &[S], rng: R) -> Result<Self> {
        if specs.is_empty() {
            return Err(SessionError::Config(
                "at least one endpoint is required".into(),
            ));
        }
        let candidates = specs
            .iter()
            .map(|spec| ResolvedEndpoint::from_spec(spec.as_ref()))
            .collect();
        Ok(Self {
            candidates,
            rng,
            current: None,
        })
    }

    /// All normalised candidates, in configuration order.
    pub fn candidates(&self) -> &[ResolvedEndpoint] {
        &self.candidates
    }

    /// The memoised endpoint, or a fresh uniform draw if none is held.
    pub fn select(&mut self) -> &ResolvedEndpoint {
        let candidates = &self.candidates;
        let rng = &mut self.rng;
        self.current.get_or_insert_with(|| {
            // candidates is non-empty by construction
            candidates
                .choose(rng)
                .cloned()
                .unwrap_or_else(|| candidates[0].clone())
        })
    }

    /// The memoised endpoint without drawing.
    pub fn current(&self) -> Option<&ResolvedEndpoint> {
        self.current.as_ref()
    }

    /// The endpoint a preview should show: the memoised one, else the first candidate.
    pub fn preview(&self) -> &ResolvedEndpoint {
        self.current.as_ref().unwrap_or(&self.candidates[0])
    }

    /// Forget the memoised endpoint so the next [`select`](Self::select) draws again.
    pub fn reset(&mut self) {
        self.current = None;
    }
}
