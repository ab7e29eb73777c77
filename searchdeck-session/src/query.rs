//! Query composition from the query and location boxes.

use crate::error::{Result, SessionError};

/// Combine the query text and an optional location hint into one search string.
///
/// Both inputs are trimmed. An empty query yields the location only when
/// `allow_location_only` is set (the address-bar preview may show a
/// location-only pending state); otherwise it yields an empty string.
///
/// # Examples
///
/// ```
/// use searchdeck_session::query::compose;
///
/// assert_eq!(compose("cats", "paris", false), "cats paris");
/// assert_eq!(compose("", "paris", true), "paris");
/// assert_eq!(compose("", "paris", false), "");
/// ```
pub fn compose(query: &str, location: &str, allow_location_only: bool) -> String {
    let query = query.trim();
    let location = location.trim();

    if query.is_empty() {
        return if allow_location_only {
            location.to_string()
        } else {
            String::new()
        };
    }
    if location.is_empty() {
        return query.to_string();
    }
    format!("{query} {location}")
}

/// Compose for an actual submission.
///
/// # Errors
///
/// Returns [`SessionError::EmptyQuery`] when there is no query text.
pub fn compose_for_submission(query: &str, location: &str) -> Result<String> {
    let composed = compose(query, location, false);
    if composed.is_empty() {
        return Err(SessionError::EmptyQuery);
    }
    Ok(composed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_only() {
        assert_eq!(compose("cats", "", false), "cats");
    }

    #[test]
    fn location_only_allowed() {
        assert_eq!(compose("", "paris", true), "paris");
    }

    #[test]
    fn location_only_refused() {
        assert_eq!(compose("", "paris", false), "");
    }

    #[test]
    fn query_and_location_joined_with_single_space() {
        assert_eq!(compose("cats", "paris", false), "cats paris");
    }

    #[test]
    fn inputs_are_trimmed() {
        assert_eq!(compose("  cats ", "\tparis\n", true), "cats paris");
        assert_eq!(compose("   ", "  ", true), "");
    }

    #[test]
    fn inner_whitespace_is_not_normalised() {
        assert_eq!(compose("black  cats", "new york", false), "black  cats new york");
    }

    #[test]
    fn submission_rejects_location_only() {
        let err = compose_for_submission("", "paris").unwrap_err();
        assert!(matches!(err, SessionError::EmptyQuery));
    }

    #[test]
    fn submission_accepts_query() {
        let composed = compose_for_submission(" weather ", "oslo").expect("non-empty");
        assert_eq!(composed, "weather oslo");
    }
}
