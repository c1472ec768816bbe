//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Actor`], [`MarketMetadata`] and
//! [`ActionRecord`] so tests focus on assertions rather than construction
//! boilerplate.

use alloy_primitives::{Address, B256, U256};

use crate::domain::{
    ActionKind, ActionRecord, Actor, LedgerPosition, MarketId, MarketMetadata, Outcome,
};

/// Actor whose address is `n` repeated twenty times.
pub fn actor(n: u8) -> Actor {
    Actor::new(Address::repeat_byte(n))
}

/// Market `id` with one outcome per title, ids in list order.
pub fn market(id: u64, titles: &[&str]) -> MarketMetadata {
    MarketMetadata {
        id: MarketId::new(id),
        slug: format!("market-{id}"),
        title: format!("Market {id}"),
        outcomes: titles
            .iter()
            .enumerate()
            .map(|(i, title)| Outcome {
                id: i as u64,
                title: (*title).to_string(),
            })
            .collect(),
    }
}

/// Builder for [`ActionRecord`]. Amounts default to zero, position to (0, 0).
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: ActionRecord,
}

impl RecordBuilder {
    pub fn new(kind: ActionKind, actor: Actor, market: u64, outcome: u64) -> Self {
        Self {
            record: ActionRecord {
                actor,
                kind,
                market_id: MarketId::new(market),
                outcome_id: outcome,
                shares: U256::ZERO,
                value: U256::ZERO,
                timestamp: 0,
                tx_hash: B256::ZERO,
                position: LedgerPosition::default(),
            },
        }
    }

    pub fn buy(actor: Actor, market: u64, outcome: u64) -> Self {
        Self::new(ActionKind::Buy, actor, market, outcome)
    }

    pub fn sell(actor: Actor, market: u64, outcome: u64) -> Self {
        Self::new(ActionKind::Sell, actor, market, outcome)
    }

    pub fn shares(self, shares: u64) -> Self {
        self.shares_raw(U256::from(shares))
    }

    pub fn shares_raw(mut self, shares: U256) -> Self {
        self.record.shares = shares;
        self
    }

    pub fn value(self, value: u64) -> Self {
        self.value_raw(U256::from(value))
    }

    pub fn value_raw(mut self, value: U256) -> Self {
        self.record.value = value;
        self
    }

    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.record.timestamp = timestamp;
        self
    }

    /// Place the record at `block`, `log_index`.
    pub fn at(mut self, block: u64, log_index: u64) -> Self {
        self.record.position = LedgerPosition::new(block, log_index);
        self
    }

    /// Transaction hash of `n` repeated.
    pub fn tx(mut self, n: u8) -> Self {
        self.record.tx_hash = B256::repeat_byte(n);
        self
    }

    pub fn build(self) -> ActionRecord {
        self.record
    }
}
