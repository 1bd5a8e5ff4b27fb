//! Path resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → chain.rs (ordered walk over sources)
//!     → source.rs (per-source lookup: map, file-derived, store)
//!     → Return: Resolved { target, source } | Unresolved | LookupError
//!
//! Chain assembly (at startup):
//!     PathEntry[] (config, path files)
//!     → mapping.rs (last-write-wins normalization)
//!     → MapSource / StoreSource
//!     → Freeze as immutable ResolverChain
//! ```
//!
//! # Design Decisions
//! - Chain assembled at startup, immutable at runtime
//! - Exact path match only, no prefixes or patterns
//! - Deterministic: same input always resolves the same way
//! - First match wins (ordered by configured layer order)

pub mod chain;
pub mod mapping;
pub mod source;

pub use chain::{Resolution, ResolverChain};
pub use mapping::{PathEntry, PathMapping};
pub use source::{LookupError, LookupSource, MapSource};
