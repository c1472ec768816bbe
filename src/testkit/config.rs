//! Canonical test configurations.
//!
//! Single source of truth for config values used across tests.

use crate::infrastructure::config::Config;

/// Contract address used by test configs.
pub const CONTRACT: &str = "0x1111111111111111111111111111111111111111";

/// TOML for a valid config pointing at local, unreachable endpoints.
pub fn toml() -> String {
    format!(
        r#"[server]
bind = "127.0.0.1:0"

[chain]
rpc_url = "http://127.0.0.1:1"
contract_address = "{CONTRACT}"
timeout_ms = 500

[metadata]
api_url = "http://127.0.0.1:1"
timeout_ms = 500
connect_timeout_ms = 200

[logging]
level = "warn"
"#
    )
}

/// Parsed [`toml`] config, without environment overrides.
pub fn config() -> Config {
    let mut config: Config = ::toml::from_str(&toml()).unwrap_or_default();
    config.apply_overrides(|_| None);
    config
}
