//! Error types for the searchdeck-session crate.
//!
//! Every variant carries a stable, user-safe message. None of them are
//! fatal: the controller turns each one into a [`crate::status::Status`]
//! and leaves session state unchanged.

/// Errors that can occur while composing, issuing, or recording a search.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The composed query was empty at submission time.
    #[error("empty query")]
    EmptyQuery,

    /// The request could not be sent or the backend returned a failure status.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered but the body was not a usable JSON response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A durable store could not be opened, read, or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Reading the search history failed.
    #[error("history unavailable: {0}")]
    HistoryUnavailable(String),

    /// Invalid session configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for searchdeck-session results.
pub type Result<T> = std::result::Result<T, SessionError>;

impl From<rusqlite::Error> for SessionError {
    fn from(err: rusqlite::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty_query() {
        assert_eq!(SessionError::EmptyQuery.to_string(), "empty query");
    }

    #[test]
    fn display_network() {
        let err = SessionError::Network("connection refused".into());
        assert_eq!(err.to_string(), "network error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = SessionError::Parse("expected value at line 1".into());
        assert_eq!(err.to_string(), "parse error: expected value at line 1");
    }

    #[test]
    fn display_storage_unavailable() {
        let err = SessionError::StorageUnavailable("disk full".into());
        assert_eq!(err.to_string(), "storage unavailable: disk full");
    }

    #[test]
    fn display_history_unavailable() {
        let err = SessionError::HistoryUnavailable("database is locked".into());
        assert_eq!(err.to_string(), "history unavailable: database is locked");
    }

    #[test]
    fn display_config() {
        let err = SessionError::Config("at least one endpoint is required".into());
        assert_eq!(
            err.to_string(),
            "config error: at least one endpoint is required"
        );
    }

    #[test]
    fn sqlite_error_maps_to_storage_unavailable() {
        let err: SessionError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, SessionError::StorageUnavailable(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SessionError>();
    }
}
