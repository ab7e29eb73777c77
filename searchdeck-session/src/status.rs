//! User-facing status line.
//!
//! Every outcome and error the controller sees ends up as one of these,
//! so a renderer never has to inspect errors itself.

use std::fmt;

use crate::error::SessionError;

/// What the status line should currently say.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing to report (fresh session or query box cleared).
    #[default]
    Idle,
    /// A request is in flight.
    Searching,
    /// A response with this many results was accepted.
    Loaded(usize),
    /// The request succeeded but returned no items.
    NoResults,
    /// Submission was refused because the query box was empty.
    EmptyQuery,
    /// The backend could not be reached or answered with garbage.
    Unreachable,
    /// The history list could not be read.
    HistoryUnavailable,
    /// A local store could not be written.
    StorageUnavailable,
    /// The session configuration is unusable.
    Misconfigured,
}

impl Status {
    /// Map an error to the status it should display.
    pub fn from_error(err: &SessionError) -> Self {
        match err {
            SessionError::EmptyQuery => Self::EmptyQuery,
            SessionError::Network(_) | SessionError::Parse(_) => Self::Unreachable,
            SessionError::HistoryUnavailable(_) => Self::HistoryUnavailable,
            SessionError::StorageUnavailable(_) => Self::StorageUnavailable,
            SessionError::Config(_) => Self::Misconfigured,
        }
    }

    /// Whether this status reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Unreachable | Self::HistoryUnavailable | Self::StorageUnavailable | Self::Misconfigured
        )
    }

    /// Text for the status line. Empty for [`Status::Idle`].
    pub fn message(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Searching => "Searching...".to_string(),
            Self::Loaded(1) => "1 result loaded.".to_string(),
            Self::Loaded(count) => format!("{count} results loaded."),
            Self::NoResults => "No results found. Try a broader query or switch tabs.".to_string(),
            Self::EmptyQuery => "Type a search query to begin.".to_string(),
            Self::Unreachable => "Unable to reach the search service. Please try again.".to_string(),
            Self::HistoryUnavailable => "Unable to load history.".to_string(),
            Self::StorageUnavailable => "Local storage is unavailable.".to_string(),
            Self::Misconfigured => "Search is not configured correctly.".to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_and_parse_both_unreachable() {
        assert_eq!(
            Status::from_error(&SessionError::Network("refused".into())),
            Status::Unreachable
        );
        assert_eq!(
            Status::from_error(&SessionError::Parse("bad json".into())),
            Status::Unreachable
        );
    }

    #[test]
    fn empty_query_prompts_user() {
        let status = Status::from_error(&SessionError::EmptyQuery);
        assert_eq!(status.message(), "Type a search query to begin.");
        assert!(!status.is_error());
    }

    #[test]
    fn loaded_message_counts_results() {
        assert_eq!(Status::Loaded(1).to_string(), "1 result loaded.");
        assert_eq!(Status::Loaded(12).to_string(), "12 results loaded.");
    }

    #[test]
    fn no_results_is_not_an_error() {
        assert!(!Status::NoResults.is_error());
        assert!(Status::NoResults.message().contains("broader"));
    }

    #[test]
    fn idle_is_blank() {
        assert_eq!(Status::default().message(), "");
    }

    #[test]
    fn history_unavailable_is_error() {
        let status = Status::from_error(&SessionError::HistoryUnavailable("locked".into()));
        assert!(status.is_error());
        assert_eq!(status.message(), "Unable to load history.");
    }
}
