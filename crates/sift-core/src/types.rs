//! Core types for sift-core.
//!
//! A [`Listing`] is a flat collection of [`Group`]s and [`Item`]s. Items
//! point at their owning group by key rather than being nested inside it, so
//! the matcher can walk items without caring about group layout.

/// A leaf listing entry.
///
/// `id` is the text the matcher runs substring checks against. `hidden` and
/// `matched` are presentation state owned by the visibility pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    /// Key of the owning [`Group`].
    pub group: String,
    pub hidden: bool,
    pub matched: bool,
}

impl Item {
    pub fn new(id: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: group.into(),
            hidden: false,
            matched: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

/// A container of items, visible iff it owns at least one visible item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    /// Display label. Falls back to `key` when absent.
    pub label: Option<String>,
    pub hidden: bool,
}

impl Group {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            hidden: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

/// The item/group tree the filter mutates.
///
/// The filter never adds or removes nodes; it only flips `hidden`/`matched`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub groups: Vec<Group>,
    pub items: Vec<Item>,
}

impl Listing {
    pub fn new(groups: Vec<Group>, items: Vec<Item>) -> Self {
        Self { groups, items }
    }

    pub fn group(&self, key: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items owned by `key`, in listing order.
    pub fn items_in<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |i| i.group == key)
    }

    pub fn visible_items(&self) -> usize {
        self.items.iter().filter(|i| i.is_visible()).count()
    }

    pub fn visible_groups(&self) -> usize {
        self.groups.iter().filter(|g| g.is_visible()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.groups.is_empty()
    }
}
