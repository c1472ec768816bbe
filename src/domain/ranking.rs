//! Leaderboard construction.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::action::ActionKind;
use super::amount::{rendered_value, Scale};
use super::id::Actor;
use crate::error::Error;

/// Leaderboard size for the global rankings.
pub const LEADERBOARD_SIZE: usize = 10;

/// Which aggregate a leaderboard ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingKind {
    /// Sum of positive outcome-share balances.
    Holders,
    /// Buy + Sell volume.
    Traders,
    /// Claimed winnings.
    Winners,
}

impl RankingKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Holders => "holders",
            Self::Traders => "traders",
            Self::Winners => "winners",
        }
    }

    /// Action kinds that feed this aggregate.
    #[must_use]
    pub const fn source_kinds(self) -> &'static [ActionKind] {
        match self {
            Self::Holders | Self::Traders => &[ActionKind::Buy, ActionKind::Sell],
            Self::Winners => &[ActionKind::ClaimWinnings],
        }
    }

    /// Whether rows that render as `0.00` are left off the board.
    #[must_use]
    pub const fn drops_rendered_zero(self) -> bool {
        matches!(self, Self::Traders | Self::Winners)
    }
}

impl FromStr for RankingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "holders" => Ok(Self::Holders),
            "traders" => Ok(Self::Traders),
            "winners" => Ok(Self::Winners),
            other => Err(Error::InvalidInput(format!("unknown ranking: {other}"))),
        }
    }
}

impl fmt::Display for RankingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub address: String,
    pub value: String,
    pub rank: usize,
}

/// Turn per-actor totals into a ranked, truncated leaderboard.
///
/// Zero totals are left out, and so are totals that render as `0.00` when
/// `kind` [drops them](RankingKind::drops_rendered_zero). Ordering is by the
/// rendered value, descending; equal values keep the input order.
pub fn build_ranking<'a, I>(
    kind: RankingKind,
    totals: I,
    top_n: usize,
    scale: Scale,
) -> Vec<AggregateEntry>
where
    I: IntoIterator<Item = (&'a Actor, &'a U256)>,
{
    let mut rows: Vec<(String, String, f64)> = totals
        .into_iter()
        .filter(|(_, total)| !total.is_zero())
        .map(|(actor, total)| {
            let value = scale.format(*total);
            let sort_key = rendered_value(&value);
            (actor.to_string(), value, sort_key)
        })
        .filter(|(_, _, sort_key)| !kind.drops_rendered_zero() || *sort_key > 0.0)
        .collect();

    rows.sort_by(|a, b| b.2.total_cmp(&a.2));
    rows.truncate(top_n);

    rows.into_iter()
        .enumerate()
        .map(|(i, (address, value, _))| AggregateEntry {
            address,
            value,
            rank: i + 1,
        })
        .collect()
}
