//! Store initialization and seeding.
//!
//! # Responsibilities
//! - Ensure the configured bucket exists
//! - Write seed entries whose paths are not yet present
//!
//! # Design Decisions
//! - Check-then-set runs inside one transaction
//! - Existing keys are never overwritten, so re-running is a no-op
//! - Any failure is fatal to startup

use std::convert::Infallible;

use sled::transaction::{ConflictableTransactionResult, TransactionError};

use crate::routing::PathEntry;
use crate::store::handle::{PathStore, StoreError};

/// Create `bucket` if needed and seed it with `seed`.
///
/// Returns how many entries were written.
pub fn initialize_store(
    store: &PathStore,
    bucket: &str,
    seed: &[PathEntry],
) -> Result<usize, StoreError> {
    let tree = store.bucket(bucket)?;

    let written = tree
        .transaction(|tx| -> ConflictableTransactionResult<usize, Infallible> {
            let mut written = 0;
            for entry in seed {
                if tx.get(entry.path.as_bytes())?.is_none() {
                    tx.insert(entry.path.as_bytes(), entry.target.as_bytes())?;
                    written += 1;
                }
            }
            Ok(written)
        })
        .map_err(|e| match e {
            TransactionError::Abort(never) => match never {},
            TransactionError::Storage(source) => StoreError::Write {
                bucket: bucket.to_string(),
                source,
            },
        })?;

    tree.flush().map_err(|source| StoreError::Write {
        bucket: bucket.to_string(),
        source,
    })?;

    tracing::info!(
        bucket = %bucket,
        seeded = written,
        skipped = seed.len() - written,
        "Path store initialized"
    );
    Ok(written)
}
