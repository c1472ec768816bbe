//! `marketlens check`.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Validate a configuration file without starting the server.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "valid": true,
            "config": path.display().to_string(),
            "bind": config.server.bind,
            "rpc_url": config.chain.rpc_url,
            "contract_address": config.chain.contract_address,
            "metadata_url": config.metadata.api_url,
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Bind", &config.server.bind);
    output::field("RPC", &config.chain.rpc_url);
    output::field("Contract", &config.chain.contract_address);
    output::field("Metadata API", &config.metadata.api_url);
    output::field("Block time", format!("{}s", config.chain.block_time_secs));
    match config.chain.log_chunk_size {
        Some(size) => output::field("Log chunks", format!("{size} blocks")),
        None => output::field("Log chunks", "single request"),
    }
    output::field(
        "Single-flight",
        if config.cache.single_flight { "on" } else { "off" },
    );
    if config.cache.max_entries.is_none() {
        output::warning("cache.max_entries is unset; expired entries are never swept");
    }

    Ok(())
}
