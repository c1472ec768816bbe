//! `MarketActionTx` event binding and log decoding.

use alloy_primitives::{B256, U256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::sol;

use crate::domain::{ActionKind, ActionRecord, Actor, LedgerPosition, MarketId};
use crate::error::{Error, Result};

sol! {
    /// Emitted by the prediction market contract for every user interaction.
    #[derive(Debug, PartialEq, Eq)]
    event MarketActionTx(
        address indexed user,
        uint8 indexed action,
        uint256 indexed marketId,
        uint256 outcomeId,
        uint256 shares,
        uint256 value,
        uint256 timestamp
    );
}

/// Encode an integer as an indexed topic word.
#[must_use]
pub fn topic_word(value: u64) -> B256 {
    B256::from(U256::from(value).to_be_bytes::<32>())
}

/// Decode one RPC log into an [`ActionRecord`].
///
/// # Errors
///
/// Returns [`Error::Decode`] if the log does not match the event layout, an
/// id or timestamp does not fit in 64 bits, or the log lacks its ledger
/// position (pending logs).
pub fn decode_log(log: &Log) -> Result<ActionRecord> {
    let decoded = log
        .log_decode::<MarketActionTx>()
        .map_err(|e| Error::Decode(e.to_string()))?;
    let event = decoded.inner.data;

    let block_number = log
        .block_number
        .ok_or_else(|| Error::Decode("log has no block number".into()))?;
    let log_index = log
        .log_index
        .ok_or_else(|| Error::Decode("log has no log index".into()))?;
    let tx_hash = log
        .transaction_hash
        .ok_or_else(|| Error::Decode("log has no transaction hash".into()))?;

    Ok(ActionRecord {
        actor: Actor::new(event.user),
        kind: ActionKind::from_code(event.action),
        market_id: MarketId::new(to_u64(event.marketId, "marketId")?),
        outcome_id: to_u64(event.outcomeId, "outcomeId")?,
        shares: event.shares,
        value: event.value,
        timestamp: to_u64(event.timestamp, "timestamp")?,
        tx_hash,
        position: LedgerPosition::new(block_number, log_index),
    })
}

fn to_u64(value: U256, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::Decode(format!("{field} out of range: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Log as PrimitiveLog};
    use alloy_sol_types::SolEvent;

    fn event(action: u8, market: u64) -> MarketActionTx {
        MarketActionTx {
            user: Address::repeat_byte(0x11),
            action,
            marketId: U256::from(market),
            outcomeId: U256::from(1),
            shares: U256::from(2_500_000u64),
            value: U256::from(1_000_000u64),
            timestamp: U256::from(1_700_000_000u64),
        }
    }

    fn rpc_log(event: &MarketActionTx, block: u64, index: u64) -> Log {
        Log {
            inner: PrimitiveLog {
                address: Address::repeat_byte(0xAA),
                data: event.encode_log_data(),
            },
            block_number: Some(block),
            log_index: Some(index),
            transaction_hash: Some(B256::repeat_byte(0x22)),
            ..Default::default()
        }
    }

    #[test]
    fn decodes_indexed_and_data_fields() {
        let record = decode_log(&rpc_log(&event(1, 164), 900, 3)).unwrap();

        assert_eq!(record.actor, Actor::new(Address::repeat_byte(0x11)));
        assert_eq!(record.kind, ActionKind::Sell);
        assert_eq!(record.market_id, MarketId::new(164));
        assert_eq!(record.outcome_id, 1);
        assert_eq!(record.shares, U256::from(2_500_000u64));
        assert_eq!(record.value, U256::from(1_000_000u64));
        assert_eq!(record.timestamp, 1_700_000_000);
        assert_eq!(record.tx_hash, B256::repeat_byte(0x22));
        assert_eq!(record.position, LedgerPosition::new(900, 3));
    }

    #[test]
    fn unknown_action_code_is_kept() {
        let record = decode_log(&rpc_log(&event(9, 1), 1, 0)).unwrap();
        assert_eq!(record.kind, ActionKind::Unrecognized(9));
    }

    #[test]
    fn oversized_market_id_is_a_decode_error() {
        let mut e = event(0, 1);
        e.marketId = U256::MAX;

        assert!(matches!(decode_log(&rpc_log(&e, 1, 0)), Err(Error::Decode(_))));
    }

    #[test]
    fn pending_log_is_a_decode_error() {
        let mut log = rpc_log(&event(0, 1), 1, 0);
        log.block_number = None;

        assert!(matches!(decode_log(&log), Err(Error::Decode(_))));
    }

    #[test]
    fn truncated_data_is_a_decode_error() {
        let mut log = rpc_log(&event(0, 1), 1, 0);
        let topics = log.inner.data.topics().to_vec();
        log.inner.data = alloy_primitives::LogData::new_unchecked(topics, vec![0u8; 31].into());

        assert!(matches!(decode_log(&log), Err(Error::Decode(_))));
    }

    #[test]
    fn topic_word_is_big_endian() {
        let word = topic_word(0x0102);
        assert_eq!(word[30], 0x01);
        assert_eq!(word[31], 0x02);
        assert!(word[..30].iter().all(|b| *b == 0));
    }
}
