//! Static listings used across harnesses.

use super::builders::ListingBuilder;
use sift_core::Listing;

pub const FRUIT_IDS: &[&str] = &["red-apple", "green-apple", "red-pear"];
pub const VEG_IDS: &[&str] = &["carrot", "red-onion"];

/// Two groups: `fruit` and `veg`.
pub fn produce() -> Listing {
    ListingBuilder::new()
        .group("fruit", FRUIT_IDS.iter().copied())
        .group("veg", VEG_IDS.iter().copied())
        .build()
}

/// A listing file in TOML form.
pub const LISTING_TOML: &str = r#"
[[groups]]
key = "strings"
label = "std/strings"
items = ["strings.split", "strings.trim"]

[[groups]]
key = "lists"
items = ["lists.sort", "lists.reverse"]
"#;
