//! Visibility pass: writes a [`MatchResult`] onto the listing.
//!
//! Every item and group is rewritten on every call; there is no diffing
//! against the previous state, so applying the same result twice is a no-op
//! the second time.

use crate::{
    matcher::MatchResult,
    types::{Group, Item, Listing},
};

pub fn apply_visibility(items: &mut [Item], groups: &mut [Group], result: &MatchResult) {
    for item in items.iter_mut() {
        let hit = result.is_match(&item.id);
        item.matched = hit;
        item.hidden = !hit;
    }
    for group in groups.iter_mut() {
        group.hidden = !result.group_visible(&group.key);
    }
}

/// [`apply_visibility`] over a whole [`Listing`].
pub fn apply_to_listing(listing: &mut Listing, result: &MatchResult) {
    apply_visibility(&mut listing.items, &mut listing.groups, result);
    tracing::debug!(
        visible_items = listing.visible_items(),
        visible_groups = listing.visible_groups(),
        "visibility applied"
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
