//! Backing-engine boundary: the narrow interface the store core needs,
//! plus the LMDB implementation of it.
//!
//! The store only ever asks the engine to read, write, or delete the
//! record under one slot key, inside one transaction per operation. The
//! trait takes `&mut self` on purpose: a backend handle is owned by the
//! store's serialized worker and is never shared between threads.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};
use tracing::debug;

use feedcache_core::BackendError;

use crate::config::StoreConfig;
use crate::identity::SlotKey;

/// Write semantics for an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceMode {
    /// Single-slot mode: drop every existing record, then write the new
    /// one. The store holds at most one record total.
    WholeStore,
    /// Multi-tenant mode: replace only the record under this key; records
    /// under other identities are untouched.
    ByKey,
}

/// The persistence interface the cache store core depends on.
///
/// Implementations must make each call atomic: a failed write or delete
/// leaves the record set exactly as it was before the attempt.
pub trait CacheBackend {
    /// Read the record value stored under `key`, if any.
    fn read(&mut self, key: &SlotKey) -> Result<Option<Vec<u8>>, BackendError>;

    /// Transactionally replace the record under `key` with `value`,
    /// applying the given replace semantics.
    fn write(&mut self, key: &SlotKey, value: &[u8], mode: ReplaceMode)
        -> Result<(), BackendError>;

    /// Transactionally delete the record under `key`. Returns whether a
    /// record existed. Deleting an absent record is not an error.
    fn delete(&mut self, key: &SlotKey) -> Result<bool, BackendError>;
}

/// LMDB-backed cache engine using the heed bindings.
///
/// One environment with a single unnamed database; read transactions for
/// reads, write transactions for writes and deletes. Transactions never
/// outlive the call that opened them, so no cursor or snapshot survives
/// between operations.
#[derive(Debug)]
pub struct LmdbBackend {
    env: Env,
    db: Database<Bytes, Bytes>,
}

impl LmdbBackend {
    /// Open (or create) the backing store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Open`] if the directory cannot be created,
    /// the environment cannot be opened, or the config asks for at-rest
    /// encryption - LMDB does not support it, and silently storing
    /// plaintext would be worse than refusing.
    pub fn open(config: &StoreConfig) -> Result<Self, BackendError> {
        if config.encryption_key.is_some() {
            return Err(BackendError::Open {
                reason: "the LMDB backend does not support at-rest encryption".into(),
            });
        }

        Self::open_unencrypted(&config.path, config.max_size_mb)
    }

    fn open_unencrypted(path: &Path, max_size_mb: usize) -> Result<Self, BackendError> {
        std::fs::create_dir_all(path).map_err(|e| BackendError::Open {
            reason: format!("cannot create store directory: {e}"),
        })?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(max_size_mb * 1024 * 1024)
                .max_dbs(1)
                .open(path)
        }
        .map_err(|e| BackendError::Open {
            reason: e.to_string(),
        })?;

        let mut wtxn = env.write_txn().map_err(|e| BackendError::Open {
            reason: e.to_string(),
        })?;
        let db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, None)
                .map_err(|e| BackendError::Open {
                    reason: e.to_string(),
                })?;
        wtxn.commit().map_err(|e| BackendError::Open {
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), max_size_mb, "opened LMDB backing store");
        Ok(Self { env, db })
    }
}

impl CacheBackend for LmdbBackend {
    fn read(&mut self, key: &SlotKey) -> Result<Option<Vec<u8>>, BackendError> {
        let rtxn = self.env.read_txn().map_err(|e| BackendError::Unreadable {
            reason: e.to_string(),
        })?;

        let value = self
            .db
            .get(&rtxn, key.as_bytes())
            .map_err(|e| BackendError::Unreadable {
                reason: e.to_string(),
            })?
            .map(<[u8]>::to_vec);

        Ok(value)
    }

    fn write(
        &mut self,
        key: &SlotKey,
        value: &[u8],
        mode: ReplaceMode,
    ) -> Result<(), BackendError> {
        let mut wtxn = self.env.write_txn().map_err(|e| BackendError::Commit {
            reason: e.to_string(),
        })?;

        if mode == ReplaceMode::WholeStore {
            self.db.clear(&mut wtxn).map_err(|e| BackendError::Commit {
                reason: e.to_string(),
            })?;
        }

        self.db
            .put(&mut wtxn, key.as_bytes(), value)
            .map_err(|e| BackendError::Commit {
                reason: e.to_string(),
            })?;

        wtxn.commit().map_err(|e| BackendError::Commit {
            reason: e.to_string(),
        })?;

        debug!(bytes = value.len(), ?mode, "committed cache record");
        Ok(())
    }

    fn delete(&mut self, key: &SlotKey) -> Result<bool, BackendError> {
        let mut wtxn = self.env.write_txn().map_err(|e| BackendError::Commit {
            reason: e.to_string(),
        })?;

        let deleted = self
            .db
            .delete(&mut wtxn, key.as_bytes())
            .map_err(|e| BackendError::Commit {
                reason: e.to_string(),
            })?;

        wtxn.commit().map_err(|e| BackendError::Commit {
            reason: e.to_string(),
        })?;

        debug!(deleted, "delete committed");
        Ok(deleted)
    }
}
