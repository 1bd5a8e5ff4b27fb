//! Resilience helpers.
//!
//! # Data Flow
//! ```text
//! Store open at startup:
//!     → backoff.rs (pace retries while the store file is locked)
//!     → give up at the configured acquisition timeout
//! ```
//!
//! # Design Decisions
//! - Only startup acquisition is retried; request-time lookups fail fast
//! - Every wait has a deadline

pub mod backoff;
