#![allow(unused)]
//! Controller harness: the wired pipeline driven through its triggers.
//!
//! # What this covers
//!
//! - **Load**: a `?search=` value is restored into the input and applied
//!   without writing the location.
//! - **Typing**: a burst of input changes produces exactly one filter pass
//!   and one location write, carrying the last value.
//! - **Reset**: clears the input, shows everything, drops the parameter, and
//!   supersedes a pending debounced value.
//! - **Reset triggers**: only registered names reset.
//! - **Degraded navigation**: history failures never stop the filter.
//!
//! # Running
//!
//! ```sh
//! cargo test --test controller_harness
//! ```

mod common;
use common::*;
use pretty_assertions::assert_eq;
use sift_core::{
    config::SearchConfig, Controller, FilterSummary, MemoryHistory, SearchInput, WiringError,
};
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(30);

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[test]
fn load_restores_and_applies_the_location_search() {
    let history = FakeHistory::with_query("search=red+apple");
    let mut c = controller_with(produce(), history.clone(), DELAY);

    let summary = c.on_load();

    assert_eq!(c.input().value(), "red apple");
    assert_eq!(
        summary,
        FilterSummary { terms: 2, matched_items: 1, visible_groups: 1 }
    );
    assert_visible_items!(*c.listing(), ["red-apple"]);
    assert!(history.writes().is_empty(), "load must not write the location");
}

#[test]
fn load_without_search_shows_everything() {
    let mut c = controller(produce());
    c.on_load();
    assert_all_visible!(*c.listing());
    assert!(c.input().writes.is_empty());
}

#[test]
fn load_with_unreadable_history_shows_everything() {
    let history = FakeHistory::with_query("search=carrot");
    history.fail(Failures { reads: true, writes: false });
    let mut c = controller_with(produce(), history, DELAY);
    c.on_load();
    assert_all_visible!(*c.listing());
}

// ---------------------------------------------------------------------------
// Typing
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn burst_of_keystrokes_filters_once() {
    let history = FakeHistory::default();
    let mut c = controller_with(produce(), history.clone(), DELAY);
    c.on_load();

    for value in ["c", "ca", "car", "carr", "carrot"] {
        c.input_mut().type_value(value);
        c.on_input();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_all_visible!(*c.listing());

    let summary = c.settle().await.unwrap();
    assert_eq!(summary.matched_items, 1);
    assert_visible_groups!(*c.listing(), ["veg"]);
    assert_eq!(history.writes(), vec!["search=carrot".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn pauses_longer_than_the_delay_filter_each_time() {
    let history = FakeHistory::default();
    let mut c = controller_with(produce(), history.clone(), DELAY);

    c.input_mut().type_value("red");
    c.on_input();
    c.settle().await.unwrap();
    c.input_mut().type_value("red p");
    c.on_input();
    c.settle().await.unwrap();

    assert_eq!(history.writes(), vec!["search=red", "search=red+p"]);
    assert_visible_items!(*c.listing(), ["red-pear"]);
}

#[tokio::test(start_paused = true)]
async fn raw_value_is_written_untrimmed() {
    let history = FakeHistory::default();
    let mut c = controller_with(produce(), history.clone(), DELAY);
    c.input_mut().type_value(" pear ");
    c.on_input();
    c.settle().await.unwrap();
    assert_eq!(history.writes(), vec!["search=+pear+"]);
    assert_visible_items!(*c.listing(), ["red-pear"]);
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn reset_clears_everything_and_supersedes_pending_input() {
    let history = FakeHistory::with_query("search=carrot");
    let mut c = controller_with(produce(), history.clone(), DELAY);
    c.on_load();

    c.input_mut().type_value("zzz");
    c.on_input();
    let summary = c.reset();

    assert_eq!(c.input().value(), "");
    assert_eq!(summary.matched_items, 5);
    assert_all_visible!(*c.listing());
    assert_eq!(history.query(), "");

    tokio::time::sleep(DELAY * 4).await;
    let stale = tokio::time::timeout(DELAY, c.next_debounced()).await;
    assert!(stale.is_err(), "pending input survived the reset");
    assert_all_visible!(*c.listing());
}

#[test]
fn only_registered_triggers_reset() {
    let mut c = Controller::builder()
        .input(FakeInput::default())
        .listing(produce())
        .history(FakeHistory::default())
        .reset_trigger("veg")
        .build()
        .unwrap();

    c.filter("carrot");
    assert!(c.activate("fruit").is_none());
    assert_visible_items!(*c.listing(), ["carrot"]);

    assert!(c.activate("veg").is_some());
    assert_all_visible!(*c.listing());
}

#[test]
fn filter_survives_a_rejecting_history() {
    let history = FakeHistory::default();
    history.fail(Failures { reads: false, writes: true });
    let mut c = controller_with(produce(), history.clone(), DELAY);

    let summary = c.filter("apple");
    assert_eq!(summary.matched_items, 2);
    assert!(history.writes().is_empty());
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

#[test]
fn missing_listing_fails_fast() {
    let err = Controller::<FakeInput, FakeHistory>::builder()
        .input(FakeInput::default())
        .history(FakeHistory::default())
        .build()
        .unwrap_err();
    assert_eq!(err, WiringError::MissingListing);
}

#[test]
fn collapse_setting_changes_term_count() {
    let mut c = Controller::builder()
        .input(FakeInput::default())
        .listing(produce())
        .history(MemoryHistory::new("/l"))
        .settings(SearchConfig { collapse_whitespace: true, ..SearchConfig::default() })
        .build()
        .unwrap();
    assert_eq!(c.filter("red   apple").terms, 2);
}
