//! Store handle with bounded lock acquisition.
//!
//! # Responsibilities
//! - Open the on-disk store, waiting at most the configured timeout for its lock
//! - Hand out named keyspaces (sled trees)
//! - Flush on release
//!
//! # Design Decisions
//! - Owned by startup and shared via `Arc`; no global handle
//! - Only lock contention is retried; every other error fails at once
//! - Retries sleep the calling thread, so open from a blocking context
//! - Dropping the last owner flushes and releases the file lock

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::resilience::backoff::Deadline;

const RETRY_BASE_MS: u64 = 10;
const RETRY_MAX_MS: u64 = 200;

/// Errors raised while opening or preparing the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store at {}: {source}", .path.display())]
    Open { path: PathBuf, source: sled::Error },

    #[error("store at {} still locked after {waited:?}: {source}", .path.display())]
    Timeout {
        path: PathBuf,
        waited: Duration,
        source: sled::Error,
    },

    #[error("failed to open bucket {bucket}: {source}")]
    Bucket { bucket: String, source: sled::Error },

    #[error("failed to write bucket {bucket}: {source}")]
    Write { bucket: String, source: sled::Error },
}

/// Open handle on the persistent path store.
#[derive(Debug)]
pub struct PathStore {
    db: sled::Db,
    path: PathBuf,
}

impl PathStore {
    /// Open (creating if needed) the store at `path`.
    ///
    /// While another process holds the store, opening is retried with
    /// backoff until `timeout` has elapsed.
    pub fn open(path: impl AsRef<Path>, timeout: Duration) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut deadline = Deadline::after(timeout, RETRY_BASE_MS, RETRY_MAX_MS);

        loop {
            match sled::Config::new().path(&path).open() {
                Ok(db) => {
                    tracing::info!(
                        path = %path.display(),
                        attempts = deadline.attempts() + 1,
                        "Path store opened"
                    );
                    return Ok(Self { db, path });
                }
                Err(source) if is_lock_contention(&source) => match deadline.next_delay() {
                    Some(delay) => {
                        tracing::debug!(
                            path = %path.display(),
                            error = %source,
                            delay = ?delay,
                            "Path store busy, retrying"
                        );
                        std::thread::sleep(delay);
                    }
                    None => {
                        return Err(StoreError::Timeout {
                            path,
                            waited: timeout,
                            source,
                        })
                    }
                },
                Err(source) => return Err(StoreError::Open { path, source }),
            }
        }
    }

    /// Open a named keyspace, creating it if absent.
    pub fn bucket(&self, name: &str) -> Result<sled::Tree, StoreError> {
        self.db.open_tree(name).map_err(|source| StoreError::Bucket {
            bucket: name.to_string(),
            source,
        })
    }

    /// Set `path` to `target` in `bucket`, replacing any existing value.
    pub fn set(&self, bucket: &str, path: &str, target: &str) -> Result<(), StoreError> {
        let tree = self.bucket(bucket)?;
        tree.insert(path.as_bytes(), target.as_bytes())
            .and_then(|_| tree.flush())
            .map(|_| ())
            .map_err(|source| StoreError::Write {
                bucket: bucket.to_string(),
                source,
            })
    }

    /// Remove `path` from `bucket`.
    pub fn remove(&self, bucket: &str, path: &str) -> Result<(), StoreError> {
        let tree = self.bucket(bucket)?;
        tree.remove(path.as_bytes())
            .map(|_| ())
            .map_err(|source| StoreError::Write {
                bucket: bucket.to_string(),
                source,
            })
    }

}

/// sled reports a held file lock as an I/O error with this message.
fn is_lock_contention(error: &sled::Error) -> bool {
    match error {
        sled::Error::Io(e) => {
            e.kind() == io::ErrorKind::WouldBlock || e.to_string().contains("could not acquire lock")
        }
        _ => false,
    }
}

impl Drop for PathStore {
    fn drop(&mut self) {
        match self.db.flush() {
            Ok(_) => tracing::debug!(path = %self.path.display(), "Path store released"),
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to flush path store on release"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = PathStore::open(dir.path().join("paths.db"), Duration::from_secs(1)).unwrap();

        store.set("PathToURL", "/a", "https://a.example").unwrap();
        let tree = store.bucket("PathToURL").unwrap();
        assert_eq!(tree.get("/a").unwrap().as_deref(), Some(&b"https://a.example"[..]));

        store.remove("PathToURL", "/a").unwrap();
        assert!(tree.get("/a").unwrap().is_none());
    }

    #[test]
    fn test_reopen_after_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paths.db");

        {
            let store = PathStore::open(&path, Duration::from_secs(1)).unwrap();
            store.set("PathToURL", "/kept", "https://kept.example").unwrap();
        }

        let store = PathStore::open(&path, Duration::from_secs(1)).unwrap();
        let tree = store.bucket("PathToURL").unwrap();
        assert!(tree.get("/kept").unwrap().is_some());
    }

    #[test]
    fn test_open_times_out_while_locked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paths.db");
        let _holder = PathStore::open(&path, Duration::from_secs(1)).unwrap();

        let err = PathStore::open(&path, Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, StoreError::Timeout { .. }), "{err}");
    }

    #[test]
    fn test_open_fails_fast_on_unusable_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("regular-file");
        std::fs::write(&file, "not a directory").unwrap();

        let started = std::time::Instant::now();
        let err = PathStore::open(file.join("paths.db"), Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, StoreError::Open { .. }), "{err}");
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_lock_contention_detection() {
        let held = sled::Error::Io(io::Error::new(
            io::ErrorKind::Other,
            "could not acquire lock on \"paths.db/db\": Os { code: 11 }",
        ));
        let missing = sled::Error::Io(io::Error::from(io::ErrorKind::NotFound));

        assert!(is_lock_contention(&held));
        assert!(is_lock_contention(&sled::Error::Io(io::ErrorKind::WouldBlock.into())));
        assert!(!is_lock_contention(&missing));
        assert!(!is_lock_contention(&sled::Error::Unsupported("nope".into())));
    }
}
