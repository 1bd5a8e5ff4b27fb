//! Store-backed lookup source.

use std::sync::Arc;

use crate::routing::source::{LookupError, LookupSource};
use crate::store::handle::{PathStore, StoreError};

/// Lookup source reading one bucket of the persistent store.
///
/// Reads never write and never block other readers. Holds the store handle
/// so the store stays open for as long as any chain uses this source.
#[derive(Debug, Clone)]
pub struct StoreSource {
    name: String,
    tree: sled::Tree,
    _store: Arc<PathStore>,
}

impl StoreSource {
    pub fn new(store: Arc<PathStore>, bucket: &str) -> Result<Self, StoreError> {
        let tree = store.bucket(bucket)?;
        Ok(Self {
            name: format!("store:{bucket}"),
            tree,
            _store: store,
        })
    }
}

impl LookupSource for StoreSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, path: &str) -> Result<Option<String>, LookupError> {
        let value = self
            .tree
            .get(path.as_bytes())
            .map_err(|error| LookupError::Storage {
                source_name: self.name.clone(),
                error,
            })?;

        match value {
            None => Ok(None),
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|_| LookupError::CorruptValue {
                    source_name: self.name.clone(),
                    path: path.to_string(),
                }),
        }
    }
}
