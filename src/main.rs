use anyhow::Context;
use clap::Parser;
use sift_core::{config::Config, MemoryHistory, NavigationSync};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sift", about = "sift: incremental filter for grouped listings")]
struct Cli {
    /// Listing file (TOML or JSON). Uses the built-in demo listing when omitted.
    listing: Option<PathBuf>,

    /// Initial location, e.g. `/listing?search=split`.
    #[arg(long, conflicts_with = "search")]
    url: Option<String>,

    /// Start with this search applied. Shorthand for `--url /listing?search=<query>`.
    #[arg(long)]
    search: Option<String>,

    /// Override `search.debounce_ms` from the config file.
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Read configuration from this file instead of ~/.config/sift/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to $TMPDIR/sift-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

const DEFAULT_PATH: &str = "/listing";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let path = std::env::temp_dir().join("sift-debug.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %path.display(), "sift debug log started");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Config::defaults()
        }),
    };
    if let Some(ms) = cli.debounce_ms {
        config.search.debounce_ms = ms;
    }

    let listing = match &cli.listing {
        Some(path) => sift_core::listing::load(path)
            .with_context(|| format!("loading listing {}", path.display()))?,
        None => sift_core::listing::demo(),
    };

    let location = match (cli.url, cli.search) {
        (Some(url), _) => url,
        (None, Some(query)) => {
            let history = MemoryHistory::new(DEFAULT_PATH);
            let mut nav = NavigationSync::with_param(history, config.search.param.clone());
            nav.push_search_state(&query);
            nav.history().location()
        }
        (None, None) => DEFAULT_PATH.to_string(),
    };

    sift_tui::run(sift_tui::RunOptions {
        listing,
        location,
        config,
    })
    .await
}
