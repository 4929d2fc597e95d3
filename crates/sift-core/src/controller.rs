//! Controller: drives the filter pipeline from input, reset and load events.
//!
//! # Triggers
//!
//! | Trigger | Path |
//! |---------|------|
//! | input changed | debounced, then matcher → visibility → push `?search=` |
//! | reset / activate | input cleared, pipeline runs immediately with `""` |
//! | load | `?search=` restored into the input, pipeline runs without a push |
//!
//! Debounced values come back from the timer task over an unbounded channel,
//! so the listing, input and history are only ever touched by whoever owns
//! the controller. Front-ends poll [`Controller::next_debounced`] in their
//! event loop and hand the value to [`Controller::on_debounced`].

use crate::{
    config::SearchConfig,
    debounce::Debouncer,
    error::WiringError,
    matcher::{self, TermSplit},
    navigation::{History, NavigationSync},
    types::Listing,
    visibility,
};
use std::{collections::HashSet, time::Instant};
use tokio::sync::mpsc;

/// The text-entry collaborator.
pub trait SearchInput {
    fn value(&self) -> String;
    fn set_value(&mut self, value: &str);
}

impl SearchInput for String {
    fn value(&self) -> String {
        self.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.clear();
        self.push_str(value);
    }
}

/// What one filter pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub terms: usize,
    pub matched_items: usize,
    pub visible_groups: usize,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ControllerBuilder<I, H> {
    input: Option<I>,
    listing: Option<Listing>,
    history: Option<H>,
    reset_triggers: Vec<String>,
    every_group: bool,
    settings: SearchConfig,
}

impl<I, H> Default for ControllerBuilder<I, H> {
    fn default() -> Self {
        Self {
            input: None,
            listing: None,
            history: None,
            reset_triggers: Vec::new(),
            every_group: false,
            settings: SearchConfig::default(),
        }
    }
}

impl<I: SearchInput, H: History> ControllerBuilder<I, H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, input: I) -> Self {
        self.input = Some(input);
        self
    }

    pub fn listing(mut self, listing: Listing) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn history(mut self, history: H) -> Self {
        self.history = Some(history);
        self
    }

    /// Register a reset trigger. Triggers are named after the group they
    /// link to, and must exist in the listing.
    pub fn reset_trigger(mut self, name: impl Into<String>) -> Self {
        self.reset_triggers.push(name.into());
        self
    }

    /// Register every group in the listing as a reset trigger. Expanded at
    /// build time, so it may be called before or after [`listing`](Self::listing).
    pub fn reset_on_every_group(mut self) -> Self {
        self.every_group = true;
        self
    }

    pub fn settings(mut self, settings: SearchConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Validate the wiring. Any missing collaborator is a hard error.
    pub fn build(self) -> Result<Controller<I, H>, WiringError> {
        let input = self.input.ok_or(WiringError::MissingInput)?;
        let listing = self.listing.ok_or(WiringError::MissingListing)?;
        let history = self.history.ok_or(WiringError::MissingHistory)?;

        let mut reset_triggers = self.reset_triggers;
        if self.every_group {
            reset_triggers.extend(listing.groups.iter().map(|g| g.key.clone()));
        }

        if let Some(unknown) = reset_triggers
            .iter()
            .find(|name| listing.group(name).is_none())
        {
            return Err(WiringError::UnknownResetTrigger(unknown.clone()));
        }

        let (tx, debounced) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(
            move |query: String| {
                // The receiver only goes away with the controller.
                let _ = tx.send(query);
            },
            self.settings.debounce(),
        );

        tracing::debug!(
            groups = listing.groups.len(),
            items = listing.items.len(),
            triggers = reset_triggers.len(),
            debounce_ms = self.settings.debounce_ms,
            "controller wired"
        );

        Ok(Controller {
            input,
            listing,
            navigation: NavigationSync::with_param(history, self.settings.param.clone()),
            debouncer,
            debounced,
            reset_triggers: reset_triggers.into_iter().collect(),
            split: self.settings.term_split(),
            timings: self.settings.timings,
        })
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Controller<I, H> {
    input: I,
    listing: Listing,
    navigation: NavigationSync<H>,
    debouncer: Debouncer<String>,
    debounced: mpsc::UnboundedReceiver<String>,
    reset_triggers: HashSet<String>,
    split: TermSplit,
    timings: bool,
}

impl<I: SearchInput, H: History> Controller<I, H> {
    pub fn builder() -> ControllerBuilder<I, H> {
        ControllerBuilder::new()
    }

    /// Startup hook. Restores `?search=` into the input and filters once.
    pub fn on_load(&mut self) -> FilterSummary {
        if let Some(restored) = self.navigation.read_search_state() {
            if !restored.is_empty() {
                tracing::debug!(search = %restored, "restoring search from location");
                self.input.set_value(&restored);
            }
        }
        let value = self.input.value();
        self.run(&value, false)
    }

    /// The input changed. The current value is applied once the debounce
    /// period passes without another change.
    pub fn on_input(&mut self) {
        let value = self.input.value();
        tracing::trace!(value = %value, "input changed");
        self.debouncer.call(value);
    }

    /// Wait for the next debounced input value.
    ///
    /// Cancel-safe; intended for use inside `tokio::select!`.
    pub async fn next_debounced(&mut self) -> Option<String> {
        self.debounced.recv().await
    }

    /// Apply a value produced by [`next_debounced`](Self::next_debounced).
    pub fn on_debounced(&mut self, query: String) -> FilterSummary {
        self.run(&query, true)
    }

    /// Wait for the pending debounced value and apply it.
    pub async fn settle(&mut self) -> Option<FilterSummary> {
        let query = self.next_debounced().await?;
        Some(self.on_debounced(query))
    }

    /// Clear the input and show everything, immediately.
    pub fn reset(&mut self) -> FilterSummary {
        tracing::debug!("search reset");
        self.input.set_value("");
        self.filter("")
    }

    /// A reset trigger was activated. Returns `None` if `name` is not a
    /// registered trigger.
    pub fn activate(&mut self, name: &str) -> Option<FilterSummary> {
        if self.reset_triggers.contains(name) {
            tracing::debug!(trigger = %name, "reset trigger activated");
            Some(self.reset())
        } else {
            None
        }
    }

    /// Run the full pipeline for `raw` and record it in the location. Any
    /// input still waiting on the debounce is discarded.
    pub fn filter(&mut self, raw: &str) -> FilterSummary {
        self.supersede_pending();
        self.run(raw, true)
    }

    fn supersede_pending(&mut self) {
        self.debouncer.cancel();
        while self.debounced.try_recv().is_ok() {}
    }

    fn run(&mut self, raw: &str, push: bool) -> FilterSummary {
        let started = self.timings.then(Instant::now);

        let result = matcher::compute_matches_with(raw, &self.listing.items, self.split);
        visibility::apply_to_listing(&mut self.listing, &result);
        if push {
            self.navigation.push_search_state(raw);
        }

        let summary = FilterSummary {
            terms: matcher::terms(raw, self.split).len(),
            matched_items: result.items.len(),
            visible_groups: result.groups.len(),
        };

        if let Some(started) = started {
            tracing::info!(
                elapsed = ?started.elapsed(),
                query = %raw,
                matched = summary.matched_items,
                "search"
            );
        }
        summary
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Mutable access for front-ends that edit the input in place. Call
    /// [`on_input`](Self::on_input) afterwards.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn navigation(&self) -> &NavigationSync<H> {
        &self.navigation
    }

    pub fn is_reset_trigger(&self, name: &str) -> bool {
        self.reset_triggers.contains(name)
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
