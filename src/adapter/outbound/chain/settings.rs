//! Chain (JSON-RPC) configuration.

use serde::Deserialize;

/// JSON-RPC endpoint and market contract settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Address of the prediction market contract. Required.
    #[serde(default)]
    pub contract_address: String,
    /// Average block interval, used to convert time spans into block counts.
    #[serde(default = "default_block_time_secs")]
    pub block_time_secs: u64,
    /// Maximum blocks per `eth_getLogs` call. Unset queries the range at once.
    #[serde(default)]
    pub log_chunk_size: Option<u64>,
    /// Per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_rpc_url() -> String {
    "https://forno.celo-sepolia.celo-testnet.org".into()
}

const fn default_block_time_secs() -> u64 {
    5
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_address: String::new(),
            block_time_secs: default_block_time_secs(),
            log_chunk_size: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}
