//! [`ActionSource`] backed by `eth_getLogs` on an EVM JSON-RPC endpoint.

use std::future::Future;
use std::time::Duration;

use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::{Filter, Log};
use alloy_sol_types::SolEvent;
use async_trait::async_trait;
use tracing::{debug, instrument};
use url::Url;

use super::event::{decode_log, topic_word, MarketActionTx};
use super::settings::ChainConfig;
use crate::domain::action::sort_ledger_order;
use crate::domain::ActionRecord;
use crate::error::{ConfigError, Error, Result};
use crate::port::{ActionFilter, ActionSource};

/// Reads `MarketActionTx` logs of one contract.
pub struct ChainActionSource {
    provider: DynProvider,
    contract: Address,
    chunk_size: Option<u64>,
    timeout: Duration,
}

impl ChainActionSource {
    /// Connect an HTTP provider for `config`.
    ///
    /// No request is made until the first call.
    ///
    /// # Errors
    ///
    /// Returns a config error if the RPC URL or contract address is malformed.
    pub fn from_config(config: &ChainConfig) -> Result<Self> {
        let url = config
            .rpc_url
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "chain.rpc_url",
                reason: e.to_string(),
            })?;
        let contract = config
            .contract_address
            .parse::<Address>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "chain.contract_address",
                reason: e.to_string(),
            })?;

        let provider = ProviderBuilder::new().connect_http(url).erased();

        Ok(Self {
            provider,
            contract,
            chunk_size: config.log_chunk_size.filter(|size| *size > 0),
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    fn base_filter(&self, filter: &ActionFilter) -> Filter {
        let mut query = Filter::new()
            .address(self.contract)
            .event_signature(MarketActionTx::SIGNATURE_HASH);

        if !filter.kinds.is_empty() {
            let codes: Vec<_> = filter
                .kinds
                .iter()
                .map(|kind| topic_word(u64::from(kind.code())))
                .collect();
            query = query.topic2(codes);
        }
        if let Some(market_id) = filter.market_id {
            query = query.topic3(topic_word(market_id.get()));
        }
        query
    }

    async fn call<T, E, F>(&self, method: &str, fut: F) -> Result<T>
    where
        E: std::fmt::Display,
        F: Future<Output = std::result::Result<T, E>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(Error::SourceUnavailable(format!("{method}: {err}"))),
            Err(_) => Err(Error::SourceUnavailable(format!(
                "{method}: timed out after {}ms",
                self.timeout.as_millis()
            ))),
        }
    }

    async fn logs(&self, filter: &ActionFilter) -> Result<Vec<Log>> {
        let query = self.base_filter(filter);

        let Some(chunk_size) = self.chunk_size else {
            let query = match filter.to_block {
                Some(to) => query.from_block(filter.from_block).to_block(to),
                None => query.from_block(filter.from_block),
            };
            return self.call("eth_getLogs", self.provider.get_logs(&query)).await;
        };

        let to_block = match filter.to_block {
            Some(to) => to,
            None => self.latest_block().await?,
        };
        let mut logs = Vec::new();
        for (from, to) in chunk_ranges(filter.from_block, to_block, chunk_size) {
            let chunk = query.clone().from_block(from).to_block(to);
            let batch = self.call("eth_getLogs", self.provider.get_logs(&chunk)).await?;
            debug!(from, to, count = batch.len(), "Fetched log chunk");
            logs.extend(batch);
        }
        Ok(logs)
    }
}

/// Split `[from, to]` into consecutive inclusive ranges of at most `size` blocks.
fn chunk_ranges(from: u64, to: u64, size: u64) -> Vec<(u64, u64)> {
    let size = size.max(1);
    let mut ranges = Vec::new();
    let mut start = from;
    while start <= to {
        let end = start.saturating_add(size - 1).min(to);
        ranges.push((start, end));
        if end == u64::MAX {
            break;
        }
        start = end + 1;
    }
    ranges
}

#[async_trait]
impl ActionSource for ChainActionSource {
    async fn latest_block(&self) -> Result<u64> {
        self.call("eth_blockNumber", self.provider.get_block_number())
            .await
    }

    #[instrument(skip(self), fields(contract = %self.contract))]
    async fn fetch_actions(&self, filter: &ActionFilter) -> Result<Vec<ActionRecord>> {
        let logs = self.logs(filter).await?;
        let mut records = logs.iter().map(decode_log).collect::<Result<Vec<_>>>()?;
        sort_ledger_order(&mut records);
        debug!(count = records.len(), "Decoded action records");
        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "chain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionKind, MarketId};

    fn config() -> ChainConfig {
        ChainConfig {
            contract_address: "0x1111111111111111111111111111111111111111".into(),
            ..ChainConfig::default()
        }
    }

    #[test]
    fn chunk_ranges_cover_the_span_exactly() {
        assert_eq!(chunk_ranges(0, 9, 4), vec![(0, 3), (4, 7), (8, 9)]);
        assert_eq!(chunk_ranges(5, 5, 100), vec![(5, 5)]);
        assert!(chunk_ranges(6, 5, 10).is_empty());
    }

    #[test]
    fn chunk_ranges_stop_at_the_top_of_the_range() {
        let ranges = chunk_ranges(u64::MAX - 1, u64::MAX, 10);
        assert_eq!(ranges, vec![(u64::MAX - 1, u64::MAX)]);
    }

    #[test]
    fn rejects_malformed_contract_address() {
        let bad = ChainConfig {
            contract_address: "0x123".into(),
            ..ChainConfig::default()
        };
        assert!(matches!(
            ChainActionSource::from_config(&bad),
            Err(Error::Config(ConfigError::InvalidValue { field: "chain.contract_address", .. }))
        ));
    }

    #[test]
    fn rejects_malformed_rpc_url() {
        let bad = ChainConfig {
            rpc_url: "not a url".into(),
            ..config()
        };
        assert!(matches!(
            ChainActionSource::from_config(&bad),
            Err(Error::Config(ConfigError::InvalidValue { field: "chain.rpc_url", .. }))
        ));
    }

    #[tokio::test]
    async fn pushes_market_and_kinds_down_as_topics() {
        let source = ChainActionSource::from_config(&config()).unwrap();
        let filter = ActionFilter::range(0, None)
            .market(MarketId::new(7))
            .kinds([ActionKind::Buy, ActionKind::Sell]);

        let query = source.base_filter(&filter);

        assert!(query.topics[0].matches(&MarketActionTx::SIGNATURE_HASH));
        assert!(query.topics[2].matches(&topic_word(0)));
        assert!(query.topics[2].matches(&topic_word(1)));
        assert!(!query.topics[2].matches(&topic_word(4)));
        assert!(query.topics[3].matches(&topic_word(7)));
        assert!(!query.topics[3].matches(&topic_word(8)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_source_unavailable() {
        let source = ChainActionSource::from_config(&ChainConfig {
            rpc_url: "http://127.0.0.1:1".into(),
            timeout_ms: 2_000,
            ..config()
        })
        .unwrap();

        assert!(matches!(
            source.latest_block().await,
            Err(Error::SourceUnavailable(_))
        ));
    }
}
