//! sift TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, AppState};

use sift_core::{config::Config, Listing};

/// Everything the shell needs to start.
#[derive(Debug)]
pub struct RunOptions {
    pub listing: Listing,
    /// Initial location, e.g. `/listing?search=split`.
    pub location: String,
    pub config: Config,
}

/// Wire the controller, restore the search from the location and run the
/// event loop until the user quits.
pub async fn run(opts: RunOptions) -> anyhow::Result<()> {
    tracing::info!(
        groups = opts.listing.groups.len(),
        items = opts.listing.items.len(),
        location = %opts.location,
        "starting sift"
    );
    let state = AppState::new(opts.listing, &opts.location, opts.config)?;
    App::new(state).run().await
}
