//! Market action records replayed from the contract event log.

use std::cmp::Ordering;
use std::fmt;

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

use super::id::{Actor, MarketId};

/// Kind of interaction recorded by a `MarketActionTx` event.
///
/// Codes outside the known range are kept as [`ActionKind::Unrecognized`]
/// instead of being folded into a known kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Buy,
    Sell,
    AddLiquidity,
    RemoveLiquidity,
    ClaimWinnings,
    ClaimLiquidity,
    ClaimFees,
    ClaimVoided,
    Unrecognized(u8),
}

impl ActionKind {
    /// Decode the on-chain `uint8` action code.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Buy,
            1 => Self::Sell,
            2 => Self::AddLiquidity,
            3 => Self::RemoveLiquidity,
            4 => Self::ClaimWinnings,
            5 => Self::ClaimLiquidity,
            6 => Self::ClaimFees,
            7 => Self::ClaimVoided,
            other => Self::Unrecognized(other),
        }
    }

    /// The on-chain `uint8` action code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Buy => 0,
            Self::Sell => 1,
            Self::AddLiquidity => 2,
            Self::RemoveLiquidity => 3,
            Self::ClaimWinnings => 4,
            Self::ClaimLiquidity => 5,
            Self::ClaimFees => 6,
            Self::ClaimVoided => 7,
            Self::Unrecognized(code) => code,
        }
    }

    /// Trade side for Buy/Sell, `None` for everything else.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Buy => Some(Side::Buy),
            Self::Sell => Some(Side::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
            Self::AddLiquidity => write!(f, "add_liquidity"),
            Self::RemoveLiquidity => write!(f, "remove_liquidity"),
            Self::ClaimWinnings => write!(f, "claim_winnings"),
            Self::ClaimLiquidity => write!(f, "claim_liquidity"),
            Self::ClaimFees => write!(f, "claim_fees"),
            Self::ClaimVoided => write!(f, "claim_voided"),
            Self::Unrecognized(code) => write!(f, "unrecognized({code})"),
        }
    }
}

/// Trade direction of a Buy or Sell action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

/// Position of a record in the ledger: block, then log index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LedgerPosition {
    pub block_number: u64,
    pub log_index: u64,
}

impl LedgerPosition {
    #[must_use]
    pub const fn new(block_number: u64, log_index: u64) -> Self {
        Self {
            block_number,
            log_index,
        }
    }
}

/// One immutable market interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub actor: Actor,
    pub kind: ActionKind,
    pub market_id: MarketId,
    /// Outcome index; only meaningful for Buy/Sell.
    pub outcome_id: u64,
    /// Share delta in smallest units.
    pub shares: U256,
    /// Monetary value in smallest units.
    pub value: U256,
    /// Unix seconds.
    pub timestamp: u64,
    pub tx_hash: B256,
    pub position: LedgerPosition,
}

impl ActionRecord {
    /// Ledger order comparison.
    #[must_use]
    pub fn ledger_cmp(&self, other: &Self) -> Ordering {
        self.position.cmp(&other.position)
    }
}

/// Sort records into ledger order, keeping arrival order among equal positions.
pub fn sort_ledger_order(records: &mut [ActionRecord]) {
    records.sort_by(ActionRecord::ledger_cmp);
}
