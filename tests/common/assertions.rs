//! Listing-level assertion macros for sift harnesses.
//!
//! These wrap `pretty_assertions` so a failing visibility check shows the
//! full expected and actual id lists side by side.

/// Assert the ids of the visible items, in listing order.
///
/// ```rust
/// assert_visible_items!(listing, ["red-apple", "green-apple"]);
/// ```
#[macro_export]
macro_rules! assert_visible_items {
    ($listing:expr, [$($id:expr),* $(,)?]) => {{
        let listing: &sift_core::Listing = &$listing;
        let actual: Vec<&str> = listing
            .items
            .iter()
            .filter(|i| i.is_visible())
            .map(|i| i.id.as_str())
            .collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "visible items");
    }};
}

/// Assert the keys of the visible groups, in listing order.
#[macro_export]
macro_rules! assert_visible_groups {
    ($listing:expr, [$($key:expr),* $(,)?]) => {{
        let listing: &sift_core::Listing = &$listing;
        let actual: Vec<&str> = listing
            .groups
            .iter()
            .filter(|g| g.is_visible())
            .map(|g| g.key.as_str())
            .collect();
        let expected: Vec<&str> = vec![$($key),*];
        pretty_assertions::assert_eq!(actual, expected, "visible groups");
    }};
}

/// Assert that every item and group is visible.
#[macro_export]
macro_rules! assert_all_visible {
    ($listing:expr) => {{
        let listing: &sift_core::Listing = &$listing;
        pretty_assertions::assert_eq!(listing.visible_items(), listing.items.len());
        pretty_assertions::assert_eq!(listing.visible_groups(), listing.groups.len());
    }};
}
