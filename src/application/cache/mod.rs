//! Time-windowed projection cache.
//!
//! [`ProjectionCache`] sits in front of the expensive projections. A value
//! is served from the backing [`CacheStore`] while it is younger than its
//! TTL and recomputed otherwise. Values are stored as JSON text, so a hit
//! serializes to exactly what the miss that produced it did.
//!
//! With single-flight enabled, concurrent misses on one key wait on a
//! per-key async mutex and the first caller's result is reused by the rest.

mod clock;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub use clock::{Clock, SystemClock};

use crate::error::Result;
use crate::port::{CacheEntry, CacheStore};

/// Whether a value came from the store or was just computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Value of the `X-Cache` response header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

/// A projection together with its cache provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub status: CacheStatus,
    /// Unix milliseconds at which the value was computed.
    pub stored_at_ms: u64,
}

/// Cache behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Share one computation between concurrent misses on the same key.
    pub single_flight: bool,
    /// Sweep expired entries once the store holds more than this many.
    pub max_entries: Option<usize>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            single_flight: true,
            max_entries: None,
        }
    }
}

pub struct ProjectionCache {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    options: CacheOptions,
    inflight: DashMap<String, Arc<Mutex<()>>>,
}

impl ProjectionCache {
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>, options: CacheOptions) -> Self {
        Self {
            store,
            clock,
            options,
            inflight: DashMap::new(),
        }
    }

    /// Current time according to the cache clock.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Return the fresh value under `key`, or run `compute` and store its result.
    ///
    /// # Errors
    ///
    /// Returns whatever `compute` fails with. Failed computations are not
    /// stored, so the next call retries.
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<Cached<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.lookup(key).await {
            return Ok(hit);
        }
        if !self.options.single_flight {
            return self.fill(key, ttl, compute).await;
        }

        let gate = self.inflight.entry(key.to_string()).or_default().clone();
        let result = {
            let _guard = gate.lock().await;
            match self.lookup(key).await {
                Some(hit) => Ok(hit),
                None => self.fill(key, ttl, compute).await,
            }
        };
        // Only the last holder removes the gate; waiters still hold clones.
        self.inflight
            .remove_if(key, |_, g| Arc::ptr_eq(g, &gate) && Arc::strong_count(g) <= 2);
        result
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<Cached<T>> {
        let entry = match self.store.get(key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, error = %err, "Cache read failed, recomputing");
                return None;
            }
        };
        if !entry.is_fresh(self.clock.now_ms()) {
            debug!(key, "Cache entry expired");
            return None;
        }
        match serde_json::from_str(&entry.data) {
            Ok(value) => Some(Cached {
                value,
                status: CacheStatus::Hit,
                stored_at_ms: entry.stored_at_ms,
            }),
            Err(err) => {
                warn!(key, error = %err, "Cache entry unreadable, recomputing");
                None
            }
        }
    }

    async fn fill<T, F, Fut>(&self, key: &str, ttl: Duration, compute: F) -> Result<Cached<T>>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let value = compute().await?;
        let stored_at_ms = self.clock.now_ms();
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let entry = CacheEntry {
            key: key.to_string(),
            data: serde_json::to_string(&value)?,
            stored_at_ms,
            ttl_ms,
        };

        if let Err(err) = self.store.put(entry).await {
            warn!(key, error = %err, "Cache write failed");
        } else {
            debug!(key, ttl_ms, "Cached projection");
            self.enforce_bound(stored_at_ms).await;
        }

        Ok(Cached {
            value,
            status: CacheStatus::Miss,
            stored_at_ms,
        })
    }

    async fn enforce_bound(&self, now_ms: u64) {
        let Some(max) = self.options.max_entries else {
            return;
        };
        match self.store.len().await {
            Ok(len) if len > max => match self.store.sweep_expired(now_ms).await {
                Ok(removed) => debug!(removed, len, max, "Swept expired cache entries"),
                Err(err) => warn!(error = %err, "Cache sweep failed"),
            },
            Ok(_) => {}
            Err(err) => warn!(error = %err, "Cache size check failed"),
        }
    }
}
