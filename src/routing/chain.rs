//! Ordered resolver chain.
//!
//! # Responsibilities
//! - Hold lookup sources in priority order
//! - Resolve a path to the first present target
//! - Propagate storage failures instead of falling through
//!
//! # Design Decisions
//! - Order fixed at construction, never reordered at runtime
//! - Short-circuit on first hit; sources are never merged
//! - Explicit `Unresolved` rather than a silent default

use std::sync::Arc;

use crate::routing::source::{LookupError, LookupSource};

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A source produced a target.
    Resolved { target: String, source: String },
    /// No source has the path.
    Unresolved,
}

/// Ordered list of lookup sources with first-match-wins semantics.
#[derive(Debug, Clone, Default)]
pub struct ResolverChain {
    sources: Vec<Arc<dyn LookupSource>>,
}

impl ResolverChain {
    pub fn new(sources: Vec<Arc<dyn LookupSource>>) -> Self {
        Self { sources }
    }

    /// Append a source with lower priority than all existing ones.
    pub fn with_source(mut self, source: Arc<dyn LookupSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Resolve `path` against the sources in order.
    pub fn resolve(&self, path: &str) -> Result<Resolution, LookupError> {
        for source in &self.sources {
            if let Some(target) = source.lookup(path)? {
                tracing::trace!(path = %path, source = %source.name(), "Path resolved");
                return Ok(Resolution::Resolved {
                    target,
                    source: source.name().to_string(),
                });
            }
        }
        Ok(Resolution::Unresolved)
    }

    /// Source names in priority order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
