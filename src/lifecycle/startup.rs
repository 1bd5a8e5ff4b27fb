//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the final configuration (file + overrides)
//! - Build one lookup source per enabled layer, in configured order
//! - Open and seed the store before its source joins the chain
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, no partially built chain
//! - Layers initialize in order, not concurrently
//! - Listeners start last (traffic only when ready)

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::validation::{validate_config, ValidationError};
use crate::config::{load_path_file, AppConfig, ConfigError, LayerConfig, LayerKind, PathFileFormat};
use crate::routing::{LookupSource, MapSource, PathMapping, ResolverChain};
use crate::store::{initialize_store, PathStore, StoreError, StoreSource};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

/// Build the resolver chain described by `config`.
///
/// The store is opened at most once, seeded, and shared by every store layer.
/// It is released when the returned chain is dropped. Blocks while waiting
/// for the store lock.
pub fn assemble_chain(config: &AppConfig) -> Result<ResolverChain, StartupError> {
    validate_config(config).map_err(ConfigError::Validation)?;

    let mut store: Option<Arc<PathStore>> = None;
    let mut sources: Vec<Arc<dyn LookupSource>> = Vec::new();

    for (index, layer) in config.layers.iter().enumerate() {
        if !layer.enabled {
            tracing::info!(index, kind = %layer.kind, "Layer disabled, skipping");
            continue;
        }

        let source: Arc<dyn LookupSource> = match layer.kind {
            LayerKind::Map => Arc::new(MapSource::new(
                "map",
                PathMapping::from_entries(layer.entries.iter().cloned()),
            )),
            LayerKind::Yaml | LayerKind::Json => Arc::new(file_source(index, layer)?),
            LayerKind::Store => {
                let handle = match &store {
                    Some(handle) => handle.clone(),
                    None => {
                        let handle = Arc::new(open_store(config)?);
                        store = Some(handle.clone());
                        handle
                    }
                };
                Arc::new(StoreSource::new(handle, &config.store.bucket)?)
            }
        };

        tracing::info!(index, source = %source.name(), "Layer registered");
        sources.push(source);
    }

    Ok(ResolverChain::new(sources))
}

fn file_source(index: usize, layer: &LayerConfig) -> Result<MapSource, ConfigError> {
    let missing = || ConfigError::Validation(vec![ValidationError::MissingFile { index, kind: layer.kind }]);
    let file = layer.file.as_deref().ok_or_else(missing)?;
    let format = PathFileFormat::for_layer(layer.kind).ok_or_else(missing)?;

    let entries = load_path_file(file, format)?;
    let mapping = PathMapping::from_entries(entries);
    if mapping.is_empty() {
        tracing::warn!(file = %file.display(), "Path file has no entries");
    }
    Ok(MapSource::new(format!("{}:{}", layer.kind, file.display()), mapping))
}

fn open_store(config: &AppConfig) -> Result<PathStore, StoreError> {
    let store = PathStore::open(
        &config.store.path,
        Duration::from_millis(config.store.open_timeout_ms),
    )?;
    initialize_store(&store, &config.store.bucket, &config.store.seed)?;
    Ok(store)
}
