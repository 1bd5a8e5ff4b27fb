//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + command-line overrides
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! For each yaml/json layer:
//!     paths.rs reads the path file
//!     → validation.rs checks every record
//!     → Vec<PathEntry> handed to chain assembly
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod paths;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use paths::{load_path_file, parse_path_entries, PathFileFormat};
pub use schema::{
    AppConfig, LayerConfig, LayerKind, ListenerConfig, ObservabilityConfig, StoreConfig,
    TimeoutConfig,
};
