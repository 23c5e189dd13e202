//! Recognized query keys and partial filters

mod scope;

pub use scope::{FilterScope, ScopeGuard};

use std::collections::BTreeMap;
use std::fmt;

/// A query key the navigation layer understands.
///
/// Declaration order is the serialization order of generated URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    /// Audience: `employee` or `student`
    Target,
    /// Delivery format: `online`, `offline` or `hybrid`
    Format,
    /// Free-text search term
    Q,
    /// Community board category label
    Category,
}

impl FilterKey {
    /// All recognized keys, in serialization order.
    pub const ALL: [FilterKey; 4] = [
        FilterKey::Target,
        FilterKey::Format,
        FilterKey::Q,
        FilterKey::Category,
    ];

    /// Look up a key by its wire name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "target" => Some(FilterKey::Target),
            "format" => Some(FilterKey::Format),
            "q" => Some(FilterKey::Q),
            "category" => Some(FilterKey::Category),
            _ => None,
        }
    }

    /// The wire name used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Target => "target",
            FilterKey::Format => "format",
            FilterKey::Q => "q",
            FilterKey::Category => "category",
        }
    }

    /// Free-text keys compare case-insensitively.
    pub fn is_free_text(self) -> bool {
        matches!(self, FilterKey::Q)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A partial set of query constraints attached to a navigation node.
///
/// Entries are kept ordered by [`FilterKey`]. An entry may hold an empty
/// value: such an entry is never serialized and never matches, but it does
/// override an ancestor's value for the same key when merged.
///
/// # Example
///
/// ```
/// use wayfinder::{Filter, FilterKey};
///
/// let parent = Filter::new().with(FilterKey::Target, "employee");
/// let child = Filter::new()
///     .with(FilterKey::Target, "student")
///     .with(FilterKey::Q, "AI");
///
/// let merged = parent.merge(&child);
/// assert_eq!(merged.get(FilterKey::Target), Some("student"));
/// assert_eq!(merged.get(FilterKey::Q), Some("AI"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    entries: BTreeMap<FilterKey, String>,
}

impl Filter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Filter::insert`].
    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: FilterKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    /// Remove `key` entirely.
    pub fn remove(&mut self, key: FilterKey) -> Option<String> {
        self.entries.remove(&key)
    }

    /// The value stored for `key`, if any (possibly empty).
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Check whether `key` has an entry.
    pub fn contains_key(&self, key: FilterKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Iterate over entries in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Entries that produce a query parameter (non-empty values only).
    pub fn serializable(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.iter().filter(|(_, v)| !v.is_empty())
    }

    /// Number of entries, including empty-valued ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the filter has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `child` over `self`: on a key collision the child's value wins.
    pub fn merge(&self, child: &Filter) -> Filter {
        let mut merged = self.clone();
        merged.extend_from(child);
        merged
    }

    /// Apply `other` on top of this filter in place.
    pub fn extend_from(&mut self, other: &Filter) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }
}

impl FromIterator<(FilterKey, String)> for Filter {
    fn from_iter<I: IntoIterator<Item = (FilterKey, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(FilterKey, &'a str)> for Filter {
    fn from_iter<I: IntoIterator<Item = (FilterKey, &'a str)>>(iter: I) -> Self {
        iter.into_iter().map(|(k, v)| (k, v.to_string())).collect()
    }
}
