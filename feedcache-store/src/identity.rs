//! Cache identity resolution: which logical slot does this store address?
//!
//! A physical backing store either holds exactly one cache (single-slot
//! mode) or multiplexes many caches behind explicit identity keys
//! (multi-tenant mode, last write wins per key). The identity is fixed at
//! store construction and resolving it has no side effects.
//!
//! # Key Format
//!
//! The slot key encodes to a fixed 17-byte array:
//! - Byte 0: mode tag (0x00 single-slot, 0x01 keyed)
//! - Bytes 1-16: identity UUID (zeroes in single-slot mode)
//!
//! Fixed-size keys keep LMDB B-tree operations cheap and make the
//! single-slot key trivially distinct from every keyed one.

use uuid::Uuid;

use crate::backend::ReplaceMode;

/// Mode tag for the single-slot key.
const SINGLE_TAG: u8 = 0x00;
/// Mode tag for keyed (multi-tenant) slots.
const KEYED_TAG: u8 = 0x01;

/// How a store instance addresses its cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheIdentity {
    /// The store holds exactly one cache; lookups match the only record.
    Single,
    /// The store holds one cache per identity key; operations only ever
    /// touch the record stored under this key.
    Keyed(Uuid),
}

impl CacheIdentity {
    /// Resolve the identity from construction-time configuration.
    pub fn from_config(identity: Option<Uuid>) -> Self {
        match identity {
            Some(key) => CacheIdentity::Keyed(key),
            None => CacheIdentity::Single,
        }
    }

    /// The encoded lookup key used by every operation of this store.
    pub fn slot_key(&self) -> SlotKey {
        match self {
            CacheIdentity::Single => SlotKey::single(),
            CacheIdentity::Keyed(key) => SlotKey::keyed(*key),
        }
    }

    /// The write semantics this identity implies: single-slot stores do a
    /// whole-store replace on insert, keyed stores upsert by key and leave
    /// other identities untouched.
    pub fn replace_mode(&self) -> ReplaceMode {
        match self {
            CacheIdentity::Single => ReplaceMode::WholeStore,
            CacheIdentity::Keyed(_) => ReplaceMode::ByKey,
        }
    }
}

/// Encoded lookup key for one cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey([u8; 17]);

impl SlotKey {
    fn single() -> Self {
        let mut bytes = [0u8; 17];
        bytes[0] = SINGLE_TAG;
        Self(bytes)
    }

    fn keyed(key: Uuid) -> Self {
        let mut bytes = [0u8; 17];
        bytes[0] = KEYED_TAG;
        bytes[1..17].copy_from_slice(key.as_bytes());
        Self(bytes)
    }

    /// Raw key bytes for the backing engine.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
