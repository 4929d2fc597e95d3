//! Test builders: ergonomic constructors for listings and controllers.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use super::fakes::{FakeHistory, FakeInput};
use sift_core::{config::SearchConfig, Controller, Group, Item, Listing};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ListingBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Listing`] fixtures.
///
/// ```rust
/// let listing = ListingBuilder::new()
///     .group("fruit", ["red-apple", "green-apple"])
///     .group("veg", ["carrot"])
///     .build();
/// ```
#[derive(Default)]
pub struct ListingBuilder {
    groups: Vec<Group>,
    items: Vec<Item>,
}

impl ListingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group<'a>(mut self, key: &str, ids: impl IntoIterator<Item = &'a str>) -> Self {
        self.groups.push(Group::new(key));
        self.items.extend(ids.into_iter().map(|id| Item::new(id, key)));
        self
    }

    /// A group with no items. Never visible after a filter pass.
    pub fn empty_group(mut self, key: &str) -> Self {
        self.groups.push(Group::new(key));
        self
    }

    pub fn build(self) -> Listing {
        Listing::new(self.groups, self.items)
    }
}

/// `n` groups of `per_group` items each, ids shaped like `g3.item-0042`.
pub fn synthetic_listing(n: usize, per_group: usize) -> Listing {
    let groups = (0..n).map(|g| Group::new(format!("g{g}"))).collect();
    let items = (0..n)
        .flat_map(|g| {
            (0..per_group).map(move |i| Item::new(format!("g{g}.item-{i:04}"), format!("g{g}")))
        })
        .collect();
    Listing::new(groups, items)
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub type TestController = Controller<FakeInput, FakeHistory>;

/// A controller over `listing` with every group registered as a reset
/// trigger and the given debounce delay.
pub fn controller_with(listing: Listing, history: FakeHistory, delay: Duration) -> TestController {
    Controller::builder()
        .input(FakeInput::default())
        .listing(listing)
        .history(history)
        .reset_on_every_group()
        .settings(SearchConfig {
            debounce_ms: delay.as_millis() as u64,
            ..SearchConfig::default()
        })
        .build()
        .expect("test controller wiring")
}

pub fn controller(listing: Listing) -> TestController {
    controller_with(listing, FakeHistory::default(), Duration::from_millis(30))
}
