//! Projection cache configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::{CacheOptions, Ttls};

/// TTLs per projection family and cache behaviour switches.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_activity_ttl_secs")]
    pub activity_ttl_secs: u64,
    #[serde(default = "default_holders_ttl_secs")]
    pub holders_ttl_secs: u64,
    #[serde(default = "default_ranking_ttl_secs")]
    pub ranking_ttl_secs: u64,
    #[serde(default = "default_metadata_ttl_secs")]
    pub metadata_ttl_secs: u64,
    /// Share one computation between concurrent misses on a key.
    #[serde(default = "default_single_flight")]
    pub single_flight: bool,
    /// Sweep expired entries once the store holds more than this many.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

const fn default_activity_ttl_secs() -> u64 {
    300
}

const fn default_holders_ttl_secs() -> u64 {
    300
}

const fn default_ranking_ttl_secs() -> u64 {
    3600
}

const fn default_metadata_ttl_secs() -> u64 {
    30
}

const fn default_single_flight() -> bool {
    true
}

impl CacheConfig {
    #[must_use]
    pub const fn ttls(&self) -> Ttls {
        Ttls {
            activity: Duration::from_secs(self.activity_ttl_secs),
            holders: Duration::from_secs(self.holders_ttl_secs),
            ranking: Duration::from_secs(self.ranking_ttl_secs),
            metadata: Duration::from_secs(self.metadata_ttl_secs),
        }
    }

    #[must_use]
    pub const fn options(&self) -> CacheOptions {
        CacheOptions {
            single_flight: self.single_flight,
            max_entries: self.max_entries,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            activity_ttl_secs: default_activity_ttl_secs(),
            holders_ttl_secs: default_holders_ttl_secs(),
            ranking_ttl_secs: default_ranking_ttl_secs(),
            metadata_ttl_secs: default_metadata_ttl_secs(),
            single_flight: default_single_flight(),
            max_entries: None,
        }
    }
}
