//! Category alias resolution.
//!
//! Users and shared links name categories loosely ("photos", "web", "img").
//! [`Category`] only ever holds the canonical id, so everything downstream
//! (tabs, request parameters, history rows) agrees on one spelling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category ids rendered as tabs, in display order.
pub const KNOWN_TABS: &[&str] = &["all", "images", "videos", "news"];

/// Alias token → canonical id.
const ALIASES: &[(&str, &str)] = &[
    ("all", "all"),
    ("general", "all"),
    ("web", "all"),
    ("image", "images"),
    ("images", "images"),
    ("img", "images"),
    ("photo", "images"),
    ("photos", "images"),
    ("pics", "images"),
    ("video", "videos"),
    ("videos", "videos"),
    ("news", "news"),
];

/// Label the backend uses for the catch-all category.
const BACKEND_GENERAL: &str = "general";

/// Resolve a free-text category token to its canonical id.
///
/// The token is trimmed and lower-cased. Unknown tokens are returned in
/// that normalised form rather than dropped, so categories the backend
/// adds later still reach it.
pub fn resolve_alias(token: &str) -> String {
    let normalised = token.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalised)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(normalised)
}

/// A canonical category id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// The catch-all category.
    pub fn all() -> Self {
        Self("all".to_string())
    }

    /// Resolve a free-text or URL-supplied token.
    pub fn resolve(token: &str) -> Self {
        Self(resolve_alias(token))
    }

    /// Build from a tab control.
    ///
    /// Canonical tab ids map to themselves; any other token is
    /// alias-resolved like [`Category::resolve`], so the held id is always
    /// canonical.
    pub fn from_tab(tab: &str) -> Self {
        Self::resolve(tab)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this category has a tab in the UI.
    pub fn is_known_tab(&self) -> bool {
        KNOWN_TABS.contains(&self.0.as_str())
    }

    /// The `categories` value sent to the backend (`all` → `general`).
    pub fn backend_label(&self) -> &str {
        if self.0 == "all" {
            BACKEND_GENERAL
        } else {
            &self.0
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::all()
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Self::resolve(&raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
