//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace/request-id/timeout layers)
//!     → redirect.rs (resolve path through the chain)
//!         → 301 Location: <target>
//!         → fallback.rs (terminal responder) when unresolved
//!         → 500 when a lookup source fails
//!     → Send to client
//! ```

pub mod fallback;
pub mod redirect;
pub mod server;

pub use fallback::default_responder;
pub use redirect::RedirectHandler;
pub use server::HttpServer;
