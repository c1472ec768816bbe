//! Process-local cache store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;
use crate::port::{CacheEntry, CacheStore};

/// Thread-safe in-memory [`CacheStore`].
///
/// Entries live until overwritten or swept; nothing expires on its own.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn put(&self, entry: CacheEntry) -> Result<()> {
        self.entries.write().insert(entry.key.clone(), entry);
        Ok(())
    }

    async fn sweep_expired(&self, now_ms: u64) -> Result<usize> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now_ms));
        Ok(before - entries.len())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, stored_at_ms: u64, ttl_ms: u64) -> CacheEntry {
        CacheEntry {
            key: key.into(),
            data: format!("\"{key}\""),
            stored_at_ms,
            ttl_ms,
        }
    }

    #[tokio::test]
    async fn put_then_get_returns_entry() {
        let store = MemoryStore::new();
        store.put(entry("a", 0, 10)).await.unwrap();

        let found = store.get("a").await.unwrap().unwrap();
        assert_eq!(found.data, "\"a\"");
        assert!(store.get("b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_existing_key() {
        let store = MemoryStore::new();
        store.put(entry("a", 0, 10)).await.unwrap();
        store.put(entry("a", 5, 10)).await.unwrap();

        assert_eq!(store.len().await.unwrap(), 1);
        assert_eq!(store.get("a").await.unwrap().unwrap().stored_at_ms, 5);
    }

    #[tokio::test]
    async fn sweep_removes_only_expired_entries() {
        let store = MemoryStore::new();
        store.put(entry("old", 0, 10)).await.unwrap();
        store.put(entry("new", 95, 10)).await.unwrap();

        let removed = store.sweep_expired(100).await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.get("old").await.unwrap().is_none());
        assert!(store.get("new").await.unwrap().is_some());
    }
}
