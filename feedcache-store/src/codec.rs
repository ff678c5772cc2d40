//! Record codec: domain feed <-> persisted record value.
//!
//! # Value Format
//!
//! A cache record is stored as `[timestamp: 8 bytes LE millis][json body]`,
//! where the body is the JSON array of stored images. Primitive fields
//! (id, url) are persisted as strings and validated on the way back out:
//! a single malformed item fails the whole decode. The codec never drops
//! a bad item silently.

use chrono::DateTime;
use feedcache_core::{BackendError, DecodeError, FeedImage, Timestamp};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Number of bytes reserved for the timestamp header.
const TIMESTAMP_LEN: usize = 8;

/// Persisted shape of one feed image. Field-level validation happens on
/// decode, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredImage {
    id: String,
    description: Option<String>,
    location: Option<String>,
    url: String,
}

impl From<&FeedImage> for StoredImage {
    fn from(image: &FeedImage) -> Self {
        Self {
            id: image.id.to_string(),
            description: image.description.clone(),
            location: image.location.clone(),
            url: image.url.to_string(),
        }
    }
}

impl TryFrom<StoredImage> for FeedImage {
    type Error = DecodeError;

    fn try_from(stored: StoredImage) -> Result<Self, DecodeError> {
        let id = Uuid::parse_str(&stored.id).map_err(|_| DecodeError::MalformedField {
            field: "id".into(),
            value: stored.id.clone(),
        })?;
        let url = Url::parse(&stored.url).map_err(|_| DecodeError::MalformedField {
            field: "url".into(),
            value: stored.url.clone(),
        })?;
        Ok(FeedImage {
            id,
            description: stored.description,
            location: stored.location,
            url,
        })
    }
}

/// Encode a feed and its timestamp into the persisted record value.
///
/// The domain model is well-formed by construction, so this is total in
/// practice; the serde error path is mapped to a commit failure because
/// nothing has been written when it fires.
pub fn encode(feed: &[FeedImage], timestamp: Timestamp) -> Result<Vec<u8>, BackendError> {
    let stored: Vec<StoredImage> = feed.iter().map(StoredImage::from).collect();
    let body = serde_json::to_vec(&stored).map_err(|e| BackendError::Commit {
        reason: format!("feed serialization failed: {e}"),
    })?;

    let mut value = Vec::with_capacity(TIMESTAMP_LEN + body.len());
    value.extend_from_slice(&timestamp.timestamp_millis().to_le_bytes());
    value.extend_from_slice(&body);
    Ok(value)
}

/// Decode a persisted record value back into the domain feed.
///
/// All-or-nothing: one malformed item invalidates the whole record.
pub fn decode(value: &[u8]) -> Result<(Vec<FeedImage>, Timestamp), DecodeError> {
    if value.len() < TIMESTAMP_LEN {
        return Err(DecodeError::UnreadableRecord {
            reason: format!("record is {} bytes, shorter than the timestamp header", value.len()),
        });
    }

    let mut millis_bytes = [0u8; TIMESTAMP_LEN];
    millis_bytes.copy_from_slice(&value[..TIMESTAMP_LEN]);
    let millis = i64::from_le_bytes(millis_bytes);
    let timestamp =
        DateTime::from_timestamp_millis(millis).ok_or_else(|| DecodeError::UnreadableRecord {
            reason: format!("timestamp {millis} is out of range"),
        })?;

    let stored: Vec<StoredImage> =
        serde_json::from_slice(&value[TIMESTAMP_LEN..]).map_err(|e| {
            DecodeError::UnreadableRecord {
                reason: e.to_string(),
            }
        })?;

    let feed = stored
        .into_iter()
        .map(FeedImage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((feed, timestamp))
}
