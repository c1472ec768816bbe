//! Backing store port for cached projections.

use async_trait::async_trait;

use crate::error::Result;

/// A stored projection and its freshness bounds.
///
/// `data` is the serialized projection, kept as text so a hit returns
/// exactly what the miss produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub data: String,
    /// Unix milliseconds at store time.
    pub stored_at_ms: u64,
    pub ttl_ms: u64,
}

impl CacheEntry {
    /// Fresh while `now_ms - stored_at_ms < ttl_ms`.
    #[must_use]
    pub const fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.stored_at_ms) < self.ttl_ms
    }
}

/// Key/value store shared by every cache user.
///
/// Entries are replaced wholesale; a `put` for an existing key overwrites it.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Entry for `key`, regardless of freshness.
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Store `entry` under its key.
    async fn put(&self, entry: CacheEntry) -> Result<()>;

    /// Remove entries that are no longer fresh at `now_ms`. Returns count removed.
    async fn sweep_expired(&self, now_ms: u64) -> Result<usize>;

    /// Number of stored entries, fresh or not.
    async fn len(&self) -> Result<usize>;
}
