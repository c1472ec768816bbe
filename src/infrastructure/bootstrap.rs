//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::cache::MemoryStore;
use crate::adapter::outbound::chain::ChainActionSource;
use crate::adapter::outbound::myriad::MyriadClient;
use crate::application::{AnalyticsService, ProjectionCache, SystemClock};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{ActionSource, CacheStore, MarketDirectory};

/// Build the projection cache from configuration.
#[must_use]
pub fn build_cache(config: &Config, store: Arc<dyn CacheStore>) -> Arc<ProjectionCache> {
    Arc::new(ProjectionCache::new(
        store,
        Arc::new(SystemClock),
        config.cache.options(),
    ))
}

/// Wire an [`AnalyticsService`] from explicit collaborators.
#[must_use]
pub fn build_analytics_with(
    config: &Config,
    source: Arc<dyn ActionSource>,
    directory: Arc<dyn MarketDirectory>,
    cache: Arc<ProjectionCache>,
) -> Arc<AnalyticsService> {
    Arc::new(AnalyticsService::new(
        source,
        directory,
        cache,
        config.analytics_settings(),
    ))
}

/// Wire the production [`AnalyticsService`]: JSON-RPC event source, Myriad
/// metadata client and an in-memory cache.
///
/// # Errors
///
/// Returns a config error if an endpoint URL or the contract address is
/// malformed.
pub fn build_analytics(config: &Config) -> Result<Arc<AnalyticsService>> {
    let source = Arc::new(ChainActionSource::from_config(&config.chain)?);
    let directory = Arc::new(MyriadClient::from_config(&config.metadata)?);
    let cache = build_cache(config, Arc::new(MemoryStore::new()));

    info!(
        rpc_url = %config.chain.rpc_url,
        contract = %config.chain.contract_address,
        metadata_url = %config.metadata.api_url,
        single_flight = config.cache.single_flight,
        "Analytics service wired"
    );

    Ok(build_analytics_with(config, source, directory, cache))
}
