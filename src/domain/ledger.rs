//! Replay of action records into running aggregates.
//!
//! Every aggregate implements [`Accumulate`] and is driven by [`fold`], which
//! applies records strictly in the order given. Sources hand records over in
//! ledger order, so Buy/Sell deltas accumulate the way the contract applied
//! them.
//!
//! Arithmetic is 256-bit throughout. Sums saturate at the type bound instead
//! of wrapping.

use std::collections::HashMap;
use std::hash::Hash;

use alloy_primitives::{B256, I256, U256};

use super::action::{ActionKind, ActionRecord, Side};
use super::id::{Actor, MarketId};

/// An aggregate that can absorb action records one at a time.
pub trait Accumulate {
    /// Fold a single record into the aggregate.
    fn apply(&mut self, record: &ActionRecord);
}

/// Fold `records` into `init`, in iteration order.
///
/// ```
/// use marketlens::domain::ledger::{fold, VolumeTally};
///
/// let tally = fold(&[], VolumeTally::default());
/// assert!(tally.is_empty());
/// ```
pub fn fold<'a, A, I>(records: I, mut init: A) -> A
where
    A: Accumulate,
    I: IntoIterator<Item = &'a ActionRecord>,
{
    for record in records {
        init.apply(record);
    }
    init
}

/// Keyed running totals that remember first-seen order.
///
/// Iteration yields keys in the order they were first touched, which is the
/// tie-break order for leaderboards.
#[derive(Debug, Clone)]
pub struct Tally<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Tally<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K, V> Tally<K, V>
where
    K: Copy + Eq + Hash,
    V: Default,
{
    /// Mutable access to the total for `key`, created at its default if new.
    pub fn entry(&mut self, key: K) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key, slot);
                self.entries.push((key, V::default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Key of a share balance: one actor's holding of one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub market_id: MarketId,
    pub outcome_id: u64,
    pub actor: Actor,
}

/// Net share balances, `Σ Buy.shares − Σ Sell.shares` per [`PositionKey`].
///
/// Balances go negative when a scan window starts after the actor's buys.
#[derive(Debug, Clone, Default)]
pub struct PositionBook {
    balances: Tally<PositionKey, I256>,
}

impl PositionBook {
    #[must_use]
    pub fn balance(&self, market_id: MarketId, outcome_id: u64, actor: Actor) -> I256 {
        let key = PositionKey {
            market_id,
            outcome_id,
            actor,
        };
        self.balances.get(&key).copied().unwrap_or(I256::ZERO)
    }

    /// Balances of one outcome, in first-seen order.
    pub fn outcome_balances(
        &self,
        market_id: MarketId,
        outcome_id: u64,
    ) -> impl Iterator<Item = (Actor, I256)> + '_ {
        self.balances
            .iter()
            .filter(move |(key, _)| key.market_id == market_id && key.outcome_id == outcome_id)
            .map(|(key, balance)| (key.actor, *balance))
    }

    /// Per actor, the sum of their positive balances across every market and
    /// outcome. Actors appear in first-seen order.
    #[must_use]
    pub fn holdings_by_actor(&self) -> Tally<Actor, U256> {
        let mut totals = Tally::default();
        for (key, balance) in self.balances.iter() {
            let total: &mut U256 = totals.entry(key.actor);
            if balance.is_positive() {
                *total = total.saturating_add(balance.into_raw());
            }
        }
        totals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl Accumulate for PositionBook {
    fn apply(&mut self, record: &ActionRecord) {
        let side = match record.kind.side() {
            Some(side) => side,
            None => return,
        };
        let key = PositionKey {
            market_id: record.market_id,
            outcome_id: record.outcome_id,
            actor: record.actor,
        };
        let delta = signed(record.shares);
        let balance = self.balances.entry(key);
        *balance = match side {
            Side::Buy => balance.saturating_add(delta),
            Side::Sell => balance.saturating_sub(delta),
        };
    }
}

fn signed(value: U256) -> I256 {
    I256::try_from(value).unwrap_or(I256::MAX)
}

/// Trading volume per actor: Buy and Sell values both count.
#[derive(Debug, Clone, Default)]
pub struct VolumeTally {
    totals: Tally<Actor, U256>,
}

impl VolumeTally {
    #[must_use]
    pub fn totals(&self) -> &Tally<Actor, U256> {
        &self.totals
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl Accumulate for VolumeTally {
    fn apply(&mut self, record: &ActionRecord) {
        if record.kind.side().is_none() {
            return;
        }
        let total = self.totals.entry(record.actor);
        *total = total.saturating_add(record.value);
    }
}

/// Claimed winnings per actor. Only `ClaimWinnings` counts.
#[derive(Debug, Clone, Default)]
pub struct WinningsTally {
    totals: Tally<Actor, U256>,
}

impl WinningsTally {
    #[must_use]
    pub fn totals(&self) -> &Tally<Actor, U256> {
        &self.totals
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl Accumulate for WinningsTally {
    fn apply(&mut self, record: &ActionRecord) {
        if record.kind != ActionKind::ClaimWinnings {
            return;
        }
        let total = self.totals.entry(record.actor);
        *total = total.saturating_add(record.value);
    }
}

/// A trade captured for the activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub actor: Actor,
    pub side: Side,
    pub market_id: MarketId,
    pub outcome_id: u64,
    pub shares: U256,
    pub value: U256,
    pub timestamp: u64,
    pub tx_hash: B256,
}

/// Buy/Sell records in arrival order.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    trades: Vec<Trade>,
}

impl ActivityLog {
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl Accumulate for ActivityLog {
    fn apply(&mut self, record: &ActionRecord) {
        if let Some(side) = record.kind.side() {
            self.trades.push(Trade {
                actor: record.actor,
                side,
                market_id: record.market_id,
                outcome_id: record.outcome_id,
                shares: record.shares,
                value: record.value,
                timestamp: record.timestamp,
                tx_hash: record.tx_hash,
            });
        }
    }
}
