//! CLI binary for SearchDeck.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use searchdeck::app::{self, SearchArgs, SettingsChange};
use searchdeck::AppConfig;
use searchdeck_session::SafeSearch;
use tracing_subscriber::EnvFilter;

/// SearchDeck: search a SearXNG-style backend from the terminal.
#[derive(Parser)]
#[command(name = "searchdeck", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a search and print the results.
    Search {
        /// Query text.
        query: String,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Open a shared link (or raw `q=...&tab=...` parameters) and search it.
    Open {
        /// Full URL, `?`-prefixed query string, or bare parameters.
        link: String,
    },

    /// Show the request URL and shareable parameters without searching.
    Preview {
        /// Query text.
        query: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// List past searches.
    History {
        /// Delete all entries instead of listing them.
        #[arg(long)]
        clear: bool,
    },

    /// Show or change persisted settings.
    Settings {
        /// Record searches in history.
        #[arg(long, value_enum)]
        history: Option<Toggle>,
        /// Default safesearch level (0, 1 or 2).
        #[arg(long, value_parser = parse_safesearch)]
        safesearch: Option<SafeSearch>,
        /// Default location hint; pass "" to clear.
        #[arg(long)]
        location: Option<String>,
    },
}

#[derive(clap::Args)]
struct FieldArgs {
    /// Location hint appended to the query.
    #[arg(long)]
    location: Option<String>,
    /// Safesearch level (0, 1 or 2).
    #[arg(long, value_parser = parse_safesearch)]
    safesearch: Option<SafeSearch>,
    /// Result tab: all, images, videos, news (aliases accepted).
    #[arg(long)]
    tab: Option<String>,
    /// Result language.
    #[arg(long)]
    language: Option<String>,
}

impl FieldArgs {
    fn into_search_args(self, query: Option<String>) -> SearchArgs {
        SearchArgs {
            query,
            location: self.location,
            safesearch: self.safesearch,
            tab: self.tab,
            language: self.language,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn parse_safesearch(raw: &str) -> Result<SafeSearch, String> {
    SafeSearch::parse(raw).ok_or_else(|| format!("expected 0, 1 or 2, got {raw:?}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Users can override with RUST_LOG=debug (or trace to see query text).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("searchdeck=info,searchdeck_session=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let mut controller = app::open_controller(&config).await?;

    let output = match cli.command {
        Command::Search { query, fields } => {
            app::search(&mut controller, &fields.into_search_args(Some(query))).await
        }
        Command::Open { link } => app::open(&mut controller, &link).await,
        Command::Preview { query, fields } => {
            app::preview(&mut controller, &fields.into_search_args(query)).await
        }
        Command::History { clear } => app::history(&mut controller, clear).await,
        Command::Settings {
            history,
            safesearch,
            location,
        } => {
            let change = SettingsChange {
                history_enabled: history.map(|t| matches!(t, Toggle::On)),
                safesearch,
                location,
            };
            app::settings(&mut controller, &change).await
        }
    };

    println!("{output}");

    if app::is_failure(controller.status()) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
