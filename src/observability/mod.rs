//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (lookup counters)
//!
//! Consumers:
//!     → stdout via tracing-subscriber fmt layer
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (path, source, request id)
//! - Request ID flows through the tower-http layers
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
