//! Event source port for market action records.

use async_trait::async_trait;

use crate::domain::{ActionKind, ActionRecord, MarketId};
use crate::error::Result;

/// Which records to pull from the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFilter {
    /// First block, inclusive. `0` scans the whole history.
    pub from_block: u64,
    /// Last block, inclusive. `None` means the chain head.
    pub to_block: Option<u64>,
    /// Restrict to one market.
    pub market_id: Option<MarketId>,
    /// Restrict to these kinds. Empty means every kind.
    pub kinds: Vec<ActionKind>,
}

impl ActionFilter {
    /// Filter over `[from_block, to_block]`.
    #[must_use]
    pub fn range(from_block: u64, to_block: Option<u64>) -> Self {
        Self {
            from_block,
            to_block,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn market(mut self, market_id: MarketId) -> Self {
        self.market_id = Some(market_id);
        self
    }

    #[must_use]
    pub fn kinds(mut self, kinds: impl IntoIterator<Item = ActionKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Whether `record` satisfies every predicate except the block range.
    #[must_use]
    pub fn matches(&self, record: &ActionRecord) -> bool {
        self.market_id.is_none_or(|id| id == record.market_id)
            && (self.kinds.is_empty() || self.kinds.contains(&record.kind))
    }

    /// Whether `block` lies inside the range.
    #[must_use]
    pub fn contains_block(&self, block: u64) -> bool {
        block >= self.from_block && self.to_block.is_none_or(|to| block <= to)
    }
}

/// Port for reading the append-only market action log.
///
/// Every call is an independent, finite pull. Implementations return records
/// in ledger order and map transport failures to
/// [`Error::SourceUnavailable`](crate::error::Error::SourceUnavailable).
/// They do not retry.
#[async_trait]
pub trait ActionSource: Send + Sync {
    /// Current chain head.
    async fn latest_block(&self) -> Result<u64>;

    /// Records matching `filter`, in ledger order.
    ///
    /// Sources that cannot push a predicate down may return extra records;
    /// the aggregates ignore kinds they do not handle.
    async fn fetch_actions(&self, filter: &ActionFilter) -> Result<Vec<ActionRecord>>;

    /// Source name for logging.
    fn source_name(&self) -> &'static str;
}
