//! Persistent path store.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     handle.rs (open store file, bounded wait for its lock)
//!     → init.rs (create bucket, seed absent keys in one transaction)
//!     → source.rs (StoreSource registered into the chain)
//!
//! Request:
//!     StoreSource::lookup → read-only get on the bucket
//! ```
//!
//! # Design Decisions
//! - Backed by sled; a bucket is a sled tree
//! - Seeding happens before the listener starts, so reads never race writes
//! - Read failures surface as `LookupError`, never as a miss

pub mod handle;
pub mod init;
pub mod source;

pub use handle::{PathStore, StoreError};
pub use init::initialize_store;
pub use source::StoreSource;
