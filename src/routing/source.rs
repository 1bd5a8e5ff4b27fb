//! Lookup sources.
//!
//! # Responsibilities
//! - Answer "which target, if any, is mapped to this path"
//! - Keep "absent" (`Ok(None)`) distinct from "storage failed" (`Err`)
//!
//! # Design Decisions
//! - Sync trait: every source answers from memory or a local store
//! - `Send + Sync` so one source can be shared by all in-flight requests
//! - In-memory and file-derived sources share `MapSource`; only the name differs

use thiserror::Error;

use crate::routing::mapping::PathMapping;

/// Failure of a lookup that must not be mistaken for a miss.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The backing store could not be read.
    #[error("storage read failed in {source_name}: {error}")]
    Storage {
        source_name: String,
        #[source]
        error: sled::Error,
    },

    /// A stored target is not valid UTF-8.
    #[error("stored target for {path} in {source_name} is not valid UTF-8")]
    CorruptValue { source_name: String, path: String },
}

/// Trait for anything that can map a request path to a redirect target.
pub trait LookupSource: Send + Sync + std::fmt::Debug {
    /// Name used in logs and metrics labels.
    fn name(&self) -> &str;

    /// Returns the target for `path`, `None` when this source has no entry.
    fn lookup(&self, path: &str) -> Result<Option<String>, LookupError>;
}

/// Immutable mapping held in memory.
///
/// Used both for literal mappings from configuration and for mappings
/// parsed from YAML/JSON path files at startup.
#[derive(Debug, Clone)]
pub struct MapSource {
    name: String,
    mapping: PathMapping,
}

impl MapSource {
    pub fn new(name: impl Into<String>, mapping: PathMapping) -> Self {
        Self {
            name: name.into(),
            mapping,
        }
    }
}

impl LookupSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, path: &str) -> Result<Option<String>, LookupError> {
        Ok(self.mapping.get(path).map(str::to_owned))
    }
}
