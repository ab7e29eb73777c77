//! Error types for the searchdeck application shell.

use searchdeck_session::SessionError;

/// Errors raised while loading configuration or preparing a session.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The config file could not be parsed or serialized.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by the search session.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
