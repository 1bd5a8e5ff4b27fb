//! Path entries and the mappings built from them.
//!
//! # Responsibilities
//! - Define the `{path, url}` record shared by config, path files and the store seed
//! - Normalize a sequence of records into a key-unique mapping
//!
//! # Design Decisions
//! - Last write wins on duplicate paths (later records override earlier ones)
//! - Building a mapping never validates; validation lives in `config::validation`
//! - Immutable once built

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single path-to-target record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathEntry {
    /// Request path, e.g. `/bolt`.
    pub path: String,

    /// Absolute redirect target.
    #[serde(rename = "url")]
    pub target: String,
}

impl PathEntry {
    pub fn new(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: target.into(),
        }
    }
}

/// Key-unique association from path to target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapping {
    targets: HashMap<String, String>,
}

impl PathMapping {
    /// Build a mapping from records in order; a later record for the same
    /// path replaces the earlier one.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PathEntry>,
    {
        let mut targets = HashMap::new();
        for entry in entries {
            targets.insert(entry.path, entry.target);
        }
        Self { targets }
    }

    /// Look up the target for an exact path.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.targets.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl FromIterator<PathEntry> for PathMapping {
    fn from_iter<I: IntoIterator<Item = PathEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
