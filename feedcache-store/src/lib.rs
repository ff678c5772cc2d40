//! feedcache store - Durable Feed Cache
//!
//! A single-record cache store for a feed of images, backed by LMDB.
//! Operations from arbitrary concurrent callers are applied one at a
//! time, in submission order, against one logical cache slot; failures
//! are classified (open / commit / decode) instead of being swallowed or
//! conflated with an empty cache.
//!
//! # Example
//!
//! ```ignore
//! use feedcache_store::{FeedCacheStore, StoreConfig};
//!
//! let store = FeedCacheStore::open(StoreConfig::new("/var/cache/feed"));
//! store.insert(feed, chrono::Utc::now()).await?;
//! match store.retrieve().await? {
//!     CachedFeed::Found { feed, timestamp } => { /* ... */ }
//!     CachedFeed::Empty => { /* nothing cached */ }
//! }
//! ```

pub mod backend;
pub mod codec;
pub mod config;
pub mod executor;
pub mod identity;
pub mod store;

pub use backend::{CacheBackend, LmdbBackend, ReplaceMode};
pub use config::StoreConfig;
pub use executor::SerialExecutor;
pub use identity::{CacheIdentity, SlotKey};
pub use store::FeedCacheStore;

// Re-export core types so callers need only this crate.
pub use feedcache_core::{
    new_image_id, BackendError, CachedFeed, DecodeError, FeedImage, StoreError, StoreResult,
    Timestamp,
};
