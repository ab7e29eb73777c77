//! SearchDeck: a terminal client for SearXNG-style metasearch backends.
//!
//! The search session logic lives in the `searchdeck-session` crate; this
//! crate adds the application shell around it:
//! - **Config**: `config.toml` with backend endpoints and storage location
//! - **Directories**: platform data/config dirs with environment overrides
//! - **Rendering**: result cards, history and settings as plain text
//! - **Commands**: handlers the `searchdeck` binary dispatches to

pub mod app;
pub mod config;
pub mod deck_dirs;
pub mod error;
pub mod render;

pub use config::AppConfig;
pub use error::{AppError, Result};
