//! feedcache core - Domain Types
//!
//! Pure data structures with no behavior. The store crate depends on this.
//! This crate contains ONLY data types and the error taxonomy - no
//! persistence logic.

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

pub mod error;

pub use error::{BackendError, DecodeError, StoreError, StoreResult};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Timestamp type using UTC timezone.
///
/// Persisted with millisecond precision; sub-millisecond detail does not
/// survive a round trip through the store.
pub type Timestamp = DateTime<Utc>;

/// Generate a new random image id.
pub fn new_image_id() -> Uuid {
    Uuid::new_v4()
}

// ============================================================================
// FEED MODEL
// ============================================================================

/// A single image entry of a cached feed.
///
/// `id` and `url` are always well-formed by construction; the optional
/// fields may be absent. Instances are immutable once built - the store
/// only ever replaces whole feeds, never individual fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedImage {
    /// Unique identifier of the image.
    pub id: Uuid,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// Optional location caption.
    pub location: Option<String>,
    /// Where the image bytes live.
    pub url: Url,
}

impl FeedImage {
    /// Create a new feed image.
    pub fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        url: Url,
    ) -> Self {
        Self {
            id,
            description,
            location,
            url,
        }
    }
}

/// Outcome of a retrieve operation.
///
/// Absence of a cached feed is a normal outcome, never an error; failures
/// (unreadable backing store, malformed stored record) travel separately
/// as [`StoreError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedFeed {
    /// Nothing has been inserted for this cache slot.
    Empty,
    /// A feed was found; `feed` preserves insertion order exactly.
    Found {
        feed: Vec<FeedImage>,
        timestamp: Timestamp,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_image_construction() {
        let id = new_image_id();
        let url = Url::parse("https://example.com/image.png").expect("valid url");
        let image = FeedImage::new(id, Some("desc".into()), None, url.clone());

        assert_eq!(image.id, id);
        assert_eq!(image.description.as_deref(), Some("desc"));
        assert_eq!(image.location, None);
        assert_eq!(image.url, url);
    }
}
