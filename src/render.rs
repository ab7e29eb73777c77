//! Plain-text rendering for the terminal.
//!
//! Renderers only consume outcomes and stored records; they never touch
//! session state.

use std::fmt::Write as _;

use chrono::DateTime;
use searchdeck_session::{
    HistoryEntry, ResultItem, SearchOutcome, SearchResponse, Settings, Status,
};

/// Result cards followed by suggestions and the status line.
pub fn render_outcome(outcome: &SearchOutcome, status: &Status) -> String {
    match outcome {
        SearchOutcome::Results(response) => {
            let mut out = render_results(response);
            out.push_str(&status.message());
            out
        }
        SearchOutcome::Empty => status.message(),
        SearchOutcome::Discarded => String::new(),
    }
}

fn render_results(response: &SearchResponse) -> String {
    let mut out = render_meta(response);
    out.push('\n');
    for (index, item) in response.results.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, item.display_title());
        let _ = writeln!(out, "   {}", item.display_url());
        let _ = writeln!(out, "   {}", item.snippet());
        if let Some(badges) = render_badges(item) {
            let _ = writeln!(out, "   {badges}");
        }
        if let Some(thumb) = item.thumbnail_url() {
            let _ = writeln!(out, "   [image] {thumb}");
        }
        out.push('\n');
    }
    if !response.suggestions.is_empty() {
        let _ = writeln!(out, "Suggestions: {}", response.suggestions.join(", "));
    }
    out
}

/// `Total results: N`, followed by the search time when reported.
fn render_meta(response: &SearchResponse) -> String {
    let mut line = format!("Total results: {}", response.total_results());
    if let Some(seconds) = response.search_time {
        let _ = write!(line, "  |  Search time: {seconds:.2}s");
    }
    line.push('\n');
    line
}

/// Engine badge and score, or `None` when the item carries neither.
fn render_badges(item: &ResultItem) -> Option<String> {
    let mut badges = Vec::new();
    if let Some(engine) = item.engine.as_deref().filter(|e| !e.is_empty()) {
        badges.push(format!("[{engine}]"));
    }
    if let Some(score) = item.score {
        badges.push(format!("score {score:.2}"));
    }
    (!badges.is_empty()).then(|| badges.join("  "))
}

/// One line per entry, most recent first as supplied.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No searches yet.".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let when = DateTime::from_timestamp_millis(entry.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        let _ = writeln!(out, "{when}  [{}]  {}", entry.category, entry.query);
    }
    out
}

pub fn render_settings(settings: &Settings) -> String {
    let location = if settings.location.is_empty() {
        "(none)"
    } else {
        settings.location.as_str()
    };
    format!(
        "safesearch: {}\nlocation:   {location}\nhistory:    {}\n",
        settings.safesearch,
        if settings.history_enabled { "on" } else { "off" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchdeck_session::{Category, SafeSearch};

    fn item(url: &str, title: Option<&str>) -> ResultItem {
        ResultItem {
            url: Some(url.to_string()),
            title: title.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn results_are_numbered_with_fallbacks() {
        let response = SearchResponse {
            results: vec![
                ResultItem {
                    engine: Some("duckduckgo".into()),
                    score: Some(4.5),
                    ..item("https://a.example", Some("Alpha"))
                },
                ResultItem {
                    img_src: Some("https://img.example/x.png".into()),
                    ..item("https://b.example", None)
                },
            ],
            suggestions: vec!["alpha beta".into()],
            number_of_results: Some(1200.0),
            search_time: Some(0.4213),
        };
        let text = render_outcome(&SearchOutcome::Results(response), &Status::Loaded(2));

        assert!(text.starts_with("Total results: 1200  |  Search time: 0.42s\n\n"));
        assert!(text.contains("1. Alpha\n   https://a.example\n"));
        assert!(text.contains("   [duckduckgo]  score 4.50\n"));
        assert!(text.contains("2. https://b.example\n   https://b.example\n   No snippet available.\n   [image]"));
        assert!(text.contains("[image] https://img.example/x.png"));
        assert!(text.contains("Suggestions: alpha beta"));
        assert!(text.ends_with("2 results loaded."));
    }

    #[test]
    fn total_falls_back_to_item_count_without_search_time() {
        let response = SearchResponse {
            results: vec![item("https://a.example", None)],
            ..Default::default()
        };
        let text = render_outcome(&SearchOutcome::Results(response), &Status::Loaded(1));
        assert!(text.starts_with("Total results: 1\n\n"));
        assert!(!text.contains("Search time"));
        assert!(!text.contains("score"));
    }

    #[test]
    fn empty_outcome_shows_only_status() {
        let text = render_outcome(&SearchOutcome::Empty, &Status::NoResults);
        assert_eq!(text, "No results found. Try a broader query or switch tabs.");
    }

    #[test]
    fn discarded_outcome_renders_nothing() {
        assert!(render_outcome(&SearchOutcome::Discarded, &Status::Loaded(3)).is_empty());
    }

    #[test]
    fn history_lines_include_category_and_time() {
        let entries = vec![HistoryEntry {
            id: 1,
            query: "cats paris".into(),
            category: Category::from_tab("images"),
            timestamp: 0,
        }];
        assert_eq!(render_history(&entries), "1970-01-01 00:00  [images]  cats paris\n");
        assert_eq!(render_history(&[]), "No searches yet.");
    }

    #[test]
    fn settings_show_placeholder_for_empty_location() {
        let text = render_settings(&Settings {
            safesearch: SafeSearch::Strict,
            location: String::new(),
            history_enabled: false,
        });
        assert!(text.contains("safesearch: 2"));
        assert!(text.contains("(none)"));
        assert!(text.contains("history:    off"));
    }
}
