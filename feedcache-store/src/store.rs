//! The public cache-store facade.
//!
//! Composes identity resolution, the record codec, and the serialized
//! executor into the three-operation contract: retrieve, insert (whole
//! replace), delete. Each call resolves to a single backend transaction
//! submitted to the store's worker; results come back through the
//! executor's completion channel, exactly once per call.
//!
//! Observed through `retrieve`, a cache slot moves between two states:
//! `Empty <-> Found`. Failures are transient outcomes of one call, never
//! a persistent state - the targeted record is always left either fully
//! pre- or fully post-operation.

use tracing::warn;

use feedcache_core::{BackendError, CachedFeed, FeedImage, StoreResult, Timestamp};

use crate::backend::{CacheBackend, LmdbBackend, ReplaceMode};
use crate::codec;
use crate::config::StoreConfig;
use crate::executor::SerialExecutor;
use crate::identity::{CacheIdentity, SlotKey};

/// A durable, serialized cache store for one feed.
///
/// All operations are async and non-blocking for the caller; the actual
/// backing-engine work runs on the store's single worker in strict
/// submission order. The store never caches feed data in memory across
/// operations - every call re-reads or re-writes authoritative state.
pub struct FeedCacheStore<B = LmdbBackend> {
    executor: SerialExecutor<B>,
    key: SlotKey,
    mode: ReplaceMode,
}

impl FeedCacheStore<LmdbBackend> {
    /// Open a store on the LMDB backend described by `config`.
    ///
    /// Construction itself cannot fail: the backing store is opened lazily
    /// by the first operation, and open problems surface as that
    /// operation's error.
    pub fn open(config: StoreConfig) -> Self {
        let identity = CacheIdentity::from_config(config.identity);
        Self::with_backend(identity, move || LmdbBackend::open(&config))
    }
}

impl<B: CacheBackend + 'static> FeedCacheStore<B> {
    /// Build a store over any backend implementation. `open` runs on the
    /// store's worker thread whenever a handle is needed.
    pub fn with_backend<F>(identity: CacheIdentity, open: F) -> Self
    where
        F: FnMut() -> Result<B, BackendError> + Send + 'static,
    {
        Self {
            executor: SerialExecutor::spawn(open),
            key: identity.slot_key(),
            mode: identity.replace_mode(),
        }
    }

    /// Retrieve the cached feed for this store's identity.
    ///
    /// Read-only: has no observable effect on stored state, even when the
    /// stored record fails validation.
    pub async fn retrieve(&self) -> StoreResult<CachedFeed> {
        let key = self.key;
        self.executor
            .submit(move |backend: &mut B| {
                let Some(value) = backend.read(&key)? else {
                    return Ok(CachedFeed::Empty);
                };
                match codec::decode(&value) {
                    Ok((feed, timestamp)) => Ok(CachedFeed::Found { feed, timestamp }),
                    Err(e) => {
                        warn!(error = %e, "stored feed failed validation");
                        Err(e.into())
                    }
                }
            })
            .await
    }

    /// Replace the cached feed with `feed` at `timestamp`.
    ///
    /// Single-slot stores replace the whole store; keyed stores upsert
    /// under their identity and leave other identities' records untouched.
    /// On a commit failure the previously stored record is unchanged.
    pub async fn insert(&self, feed: Vec<FeedImage>, timestamp: Timestamp) -> StoreResult<()> {
        let key = self.key;
        let mode = self.mode;
        self.executor
            .submit(move |backend: &mut B| {
                let value = codec::encode(&feed, timestamp)?;
                backend.write(&key, &value, mode)?;
                Ok(())
            })
            .await
    }

    /// Delete the cached feed for this store's identity.
    ///
    /// Deleting an already-empty cache succeeds with no side effect. On a
    /// commit failure the prior record is left intact.
    pub async fn delete_cached_feed(&self) -> StoreResult<()> {
        let key = self.key;
        self.executor
            .submit(move |backend: &mut B| {
                backend.delete(&key)?;
                Ok(())
            })
            .await
    }
}
