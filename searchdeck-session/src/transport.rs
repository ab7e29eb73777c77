//! Trait definition for the request/response boundary.
//!
//! The session decides what to request and where; a [`Transport`] only
//! executes the finished URL. [`crate::http::HttpTransport`] is the
//! production implementation.

use std::future::Future;

use crate::error::SessionError;
use crate::types::SearchResponse;

/// Executes a fully-built request URL against the backend.
///
/// Implementations must not retry: a failure is reported once and the
/// session turns it into a status message.
pub trait Transport: Send + Sync {
    /// Fetch and decode the backend response.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Network`] if the request fails or the backend
    /// answers with an error status, or [`SessionError::Parse`] if the body
    /// is not a JSON search response.
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<SearchResponse, SessionError>> + Send;
}
