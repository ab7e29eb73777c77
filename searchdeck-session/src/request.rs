//! Request URL construction.

use url::form_urlencoded;

use crate::endpoint::ResolvedEndpoint;
use crate::query::compose;
use crate::types::SearchState;

/// Response serialisation requested from the backend.
pub const RESPONSE_FORMAT: &str = "json";

/// Build the encoded parameter list for `state`.
///
/// Order is fixed: `q`, `format`, `safesearch`, `categories`, then
/// `language` when set. The location box is folded into `q` and never
/// sent on its own.
pub fn request_params(state: &SearchState) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", compose(&state.query, &state.location, true)),
        ("format", RESPONSE_FORMAT.to_string()),
        ("safesearch", state.safesearch.to_string()),
        ("categories", state.category.backend_label().to_string()),
    ];
    let language = state.language.trim();
    if !language.is_empty() {
        params.push(("language", language.to_string()));
    }
    params
}

/// Build the full request URL for `state` against `endpoint`.
///
/// Deterministic for a given state and endpoint.
///
/// # Examples
///
/// ```
/// use searchdeck_session::endpoint::ResolvedEndpoint;
/// use searchdeck_session::request::build_request_url;
/// use searchdeck_session::SearchState;
///
/// let mut state = SearchState::default();
/// state.query = "cats".into();
/// let endpoint = ResolvedEndpoint::from_spec("https://searx.example.org");
/// assert_eq!(
///     build_request_url(&state, &endpoint),
///     "https://searx.example.org/search?q=cats&format=json&safesearch=1&categories=general&language=en"
/// );
/// ```
pub fn build_request_url(state: &SearchState, endpoint: &ResolvedEndpoint) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in request_params(state) {
        serializer.append_pair(key, &value);
    }
    format!("{}?{}", endpoint.as_str(), serializer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::types::SafeSearch;
    use url::Url;

    fn endpoint() -> ResolvedEndpoint {
        ResolvedEndpoint::from_spec("https://xlnk-search.hf.space/search")
    }

    fn state(query: &str, location: &str, category: &str) -> SearchState {
        SearchState {
            query: query.into(),
            location: location.into(),
            category: Category::resolve(category),
            ..SearchState::default()
        }
    }

    fn pairs(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .expect("valid url")
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn param(url: &str, key: &str) -> Option<String> {
        pairs(url).into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[test]
    fn all_category_sent_as_general() {
        let mut s = state("cats", "", "all");
        s.safesearch = SafeSearch::Off;
        let url = build_request_url(&s, &endpoint());
        assert_eq!(param(&url, "categories").as_deref(), Some("general"));
        assert_eq!(param(&url, "safesearch").as_deref(), Some("0"));
        assert_eq!(param(&url, "q").as_deref(), Some("cats"));
        assert_eq!(param(&url, "format").as_deref(), Some("json"));
    }

    #[test]
    fn location_folded_into_query_not_sent_separately() {
        let url = build_request_url(&state("cafes", "Paris", "all"), &endpoint());
        assert_eq!(param(&url, "q").as_deref(), Some("cafes Paris"));
        assert!(param(&url, "location").is_none());
    }

    #[test]
    fn location_only_state_still_builds() {
        let url = build_request_url(&state("", "Paris", "news"), &endpoint());
        assert_eq!(param(&url, "q").as_deref(), Some("Paris"));
        assert_eq!(param(&url, "categories").as_deref(), Some("news"));
    }

    #[test]
    fn unknown_category_sent_verbatim() {
        let url = build_request_url(&state("x", "", "science"), &endpoint());
        assert_eq!(param(&url, "categories").as_deref(), Some("science"));
    }

    #[test]
    fn empty_language_omitted() {
        let mut s = state("x", "", "all");
        s.language = "  ".into();
        let url = build_request_url(&s, &endpoint());
        assert!(param(&url, "language").is_none());
    }

    #[test]
    fn parameter_order_is_fixed() {
        let url = build_request_url(&state("x", "", "images"), &endpoint());
        let keys: Vec<String> = pairs(&url).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["q", "format", "safesearch", "categories", "language"]);
    }

    #[test]
    fn query_is_form_encoded() {
        let url = build_request_url(&state("rust & go", "", "all"), &endpoint());
        assert!(url.starts_with("https://xlnk-search.hf.space/search?q=rust+%26+go&"));
    }

    #[test]
    fn build_is_deterministic() {
        let s = state("weather", "oslo", "videos");
        assert_eq!(
            build_request_url(&s, &endpoint()),
            build_request_url(&s, &endpoint())
        );
    }
}
