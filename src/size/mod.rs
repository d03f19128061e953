//! Component size data model and extraction
//!
//! A [`ComponentReport`] maps component names to their JS/CSS breakdown in
//! kilobytes. It is produced fresh from bundle analyzer records on every run
//! ([`extract`]) or decoded from a persisted artifact ([`artifact::decode`]).

pub mod artifact;
pub mod extractor;
pub mod stats;

pub use extractor::{bytes_to_kb, extract, StatsRecord};
pub use stats::load_stats;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Size breakdown of a single component, in kilobytes
///
/// `total` is the reported figure. It is not guaranteed to equal `js + css`:
/// legacy artifacts carry only a total (decoded as all-JS), and fresh
/// extraction rounds JS and CSS up independently before summing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SizeEntry {
    /// JS size in KB
    pub js: u64,
    /// CSS size in KB
    pub css: u64,
    /// Total size in KB
    pub total: u64,
}

impl SizeEntry {
    /// Create an entry from already-rounded kilobyte values
    pub fn new(js: u64, css: u64, total: u64) -> Self {
        Self { js, css, total }
    }

    /// Create an entry from raw byte counts
    ///
    /// Each part is rounded up to whole kilobytes first; the total is the sum
    /// of the rounded parts.
    ///
    /// ```
    /// use component_size_report::size::SizeEntry;
    ///
    /// // 1025 B -> 2 KB, 1 B -> 1 KB
    /// assert_eq!(SizeEntry::from_bytes(1025, 1), SizeEntry::new(2, 1, 3));
    /// ```
    pub fn from_bytes(js_bytes: u64, css_bytes: u64) -> Self {
        let js = bytes_to_kb(js_bytes);
        let css = bytes_to_kb(css_bytes);
        Self {
            js,
            css,
            total: js + css,
        }
    }

    /// Entry decoded from a total-only artifact line
    pub fn legacy(total: u64) -> Self {
        Self {
            js: total,
            css: 0,
            total,
        }
    }
}

/// Mapping from component name to its size breakdown
///
/// Iteration follows insertion order. Re-inserting an existing name replaces
/// its entry in place, so the order of first appearance is kept.
#[derive(Debug, Clone, Default)]
pub struct ComponentReport {
    entries: Vec<(String, SizeEntry)>,
    index: HashMap<String, usize>,
}

impl ComponentReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `name`, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, size: SizeEntry) -> Option<SizeEntry> {
        let name = name.into();
        if let Some(&pos) = self.index.get(&name) {
            let previous = std::mem::replace(&mut self.entries[pos].1, size);
            return Some(previous);
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, size));
        None
    }

    /// Look up a component by exact (case-sensitive) name
    pub fn get(&self, name: &str) -> Option<&SizeEntry> {
        self.index.get(name).map(|&pos| &self.entries[pos].1)
    }

    /// Whether the report has an entry for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report has no components
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SizeEntry)> {
        self.entries.iter().map(|(name, size)| (name.as_str(), size))
    }

    /// Component names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

// Order is not part of a report's identity.
impl PartialEq for ComponentReport {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, size)| other.get(name) == Some(size))
    }
}

impl Eq for ComponentReport {}

impl<S: Into<String>> FromIterator<(S, SizeEntry)> for ComponentReport {
    fn from_iter<I: IntoIterator<Item = (S, SizeEntry)>>(iter: I) -> Self {
        let mut report = Self::new();
        for (name, size) in iter {
            report.insert(name, size);
        }
        report
    }
}

impl Serialize for ComponentReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, size) in self.iter() {
            map.serialize_entry(name, size)?;
        }
        map.end()
    }
}
