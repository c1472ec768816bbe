//! Per-market read views: holder lists and the activity feed.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::action::Side;
use super::amount::{rendered_value, Scale};
use super::ledger::{ActivityLog, PositionBook};
use super::market::MarketMetadata;

/// Holders listed per outcome.
pub const HOLDERS_PER_OUTCOME: usize = 20;

/// Trades listed in the activity feed.
pub const ACTIVITY_FEED_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    pub address: String,
    pub shares: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeHolders {
    pub id: u64,
    pub title: String,
    pub holders: Vec<Holder>,
}

/// Top holders of every outcome of `market`, in outcome order.
///
/// Only strictly positive balances are listed.
#[must_use]
pub fn holders_view(
    market: &MarketMetadata,
    book: &PositionBook,
    per_outcome: usize,
    scale: Scale,
) -> Vec<OutcomeHolders> {
    market
        .outcomes
        .iter()
        .enumerate()
        .map(|(index, outcome)| {
            let mut holders: Vec<(Holder, f64)> = book
                .outcome_balances(market.id, index as u64)
                .filter(|(_, balance)| balance.is_positive())
                .map(|(actor, balance)| {
                    let shares = scale.format(balance.into_raw());
                    let sort_key = rendered_value(&shares);
                    (
                        Holder {
                            address: actor.to_string(),
                            shares,
                        },
                        sort_key,
                    )
                })
                .collect();
            holders.sort_by(|a, b| b.1.total_cmp(&a.1));
            holders.truncate(per_outcome);

            OutcomeHolders {
                id: outcome.id,
                title: outcome.title.clone(),
                holders: holders.into_iter().map(|(h, _)| h).collect(),
            }
        })
        .collect()
}

/// One row of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub user: String,
    pub outcome: String,
    pub side: Side,
    /// Collateral moved by the trade, rendered at market scale.
    pub shares: String,
    pub timestamp: u64,
    pub tx_hash: String,
}

/// Most recent trades of `market`, newest first.
///
/// Trades with equal timestamps keep ledger order, earliest first.
#[must_use]
pub fn activity_view(
    market: &MarketMetadata,
    log: &ActivityLog,
    limit: usize,
    scale: Scale,
) -> Vec<Activity> {
    let mut trades: Vec<_> = log
        .trades()
        .iter()
        .filter(|t| t.market_id == market.id)
        .collect();
    trades.sort_by_key(|t| Reverse(t.timestamp));

    trades
        .into_iter()
        .take(limit)
        .map(|t| Activity {
            user: t.actor.checksummed(),
            outcome: market.outcome_title(t.outcome_id),
            side: t.side,
            shares: scale.format(t.value),
            timestamp: t.timestamp,
            tx_hash: format!("{:?}", t.tx_hash),
        })
        .collect()
}
