//! Construction-time configuration for a cache store.

use std::path::PathBuf;

use uuid::Uuid;

/// Default LMDB map size in megabytes.
const DEFAULT_MAX_SIZE_MB: usize = 10;

/// Configuration for opening a feed cache store.
///
/// `path` and `encryption_key` are forwarded opaquely to the backing
/// engine; `identity` selects single-slot vs multi-tenant addressing.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory where the backing store lives.
    pub path: PathBuf,
    /// Identity key for multi-tenant mode; `None` means the store holds
    /// exactly one cache.
    pub identity: Option<Uuid>,
    /// Encryption key forwarded to the backing engine. Engines without
    /// at-rest encryption reject it when opening.
    pub encryption_key: Option<Vec<u8>>,
    /// Maximum size of the backing store in megabytes.
    pub max_size_mb: usize,
}

impl StoreConfig {
    /// Create a config for a single-slot store at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            identity: None,
            encryption_key: None,
            max_size_mb: DEFAULT_MAX_SIZE_MB,
        }
    }

    /// Address the cache stored under the given identity key.
    pub fn with_identity(mut self, identity: Uuid) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Forward an encryption key to the backing engine.
    pub fn with_encryption_key(mut self, key: Vec<u8>) -> Self {
        self.encryption_key = Some(key);
        self
    }

    /// Set the maximum backing-store size.
    pub fn with_max_size_mb(mut self, max_size_mb: usize) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }
}
