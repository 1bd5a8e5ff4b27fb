//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::PathEntry;

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Persistent path store settings.
    pub store: StoreConfig,

    /// Lookup layers, highest priority first.
    pub layers: Vec<LayerConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            store: StoreConfig::default(),
            layers: vec![
                LayerConfig::map(vec![
                    PathEntry::new(
                        "/urlshort-godoc",
                        "https://godoc.org/github.com/gophercises/urlshort",
                    ),
                    PathEntry::new("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
                    PathEntry::new("/testing", "https://twitter.com"),
                ]),
                LayerConfig::file(LayerKind::Yaml, "paths.yml"),
                LayerConfig::file(LayerKind::Json, "paths.json"),
                LayerConfig::store(),
            ],
        }
    }
}

impl AppConfig {
    /// Point every enabled layer of `kind` at `file`.
    ///
    /// Returns the number of layers updated; a file given for a kind with no
    /// configured layer appends a new layer in front of any store layer.
    pub fn set_layer_file(&mut self, kind: LayerKind, file: impl Into<PathBuf>) -> usize {
        let file = file.into();
        let mut updated = 0;
        for layer in self.layers.iter_mut().filter(|l| l.kind == kind && l.enabled) {
            layer.file = Some(file.clone());
            updated += 1;
        }
        if updated == 0 {
            let at = self
                .layers
                .iter()
                .position(|l| l.kind == LayerKind::Store)
                .unwrap_or(self.layers.len());
            self.layers.insert(at, LayerConfig::file(kind, file));
            updated = 1;
        }
        updated
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Persistent path store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store location on disk.
    pub path: PathBuf,

    /// Keyspace holding path → target entries.
    pub bucket: String,

    /// How long to wait for the store lock before giving up, in milliseconds.
    pub open_timeout_ms: u64,

    /// Entries written at startup when their path is not yet present.
    pub seed: Vec<PathEntry>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("paths.db"),
            bucket: "PathToURL".to_string(),
            open_timeout_ms: 1000,
            seed: vec![
                PathEntry::new("/bolt", "https://github.com/boltdb/bolt"),
                PathEntry::new("/gophercises", "https://gophercises.com"),
            ],
        }
    }
}

/// Kind of lookup layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Literal entries from this config.
    Map,
    /// Entries parsed from a YAML path file.
    Yaml,
    /// Entries parsed from a JSON path file.
    Json,
    /// The persistent store bucket.
    Store,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LayerKind::Map => "map",
            LayerKind::Yaml => "yaml",
            LayerKind::Json => "json",
            LayerKind::Store => "store",
        };
        f.write_str(name)
    }
}

/// One layer of the resolver chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayerConfig {
    /// Layer kind.
    pub kind: LayerKind,

    /// Path file for `yaml` and `json` layers.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Literal entries for `map` layers.
    #[serde(default)]
    pub entries: Vec<PathEntry>,

    /// Disabled layers are skipped when the chain is assembled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl LayerConfig {
    pub fn map(entries: Vec<PathEntry>) -> Self {
        Self {
            kind: LayerKind::Map,
            file: None,
            entries,
            enabled: true,
        }
    }

    pub fn file(kind: LayerKind, file: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            file: Some(file.into()),
            entries: Vec::new(),
            enabled: true,
        }
    }

    pub fn store() -> Self {
        Self {
            kind: LayerKind::Store,
            file: None,
            entries: Vec::new(),
            enabled: true,
        }
    }
}
