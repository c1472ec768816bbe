//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for deployment-specific values such as the RPC endpoint.
//!
//! # Example
//!
//! ```no_run
//! use marketlens::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use alloy_primitives::Address;
use serde::Deserialize;
use url::Url;

use super::cache::CacheConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::adapter::outbound::chain::ChainConfig;
use crate::adapter::outbound::myriad::MetadataConfig;
use crate::application::AnalyticsSettings;
use crate::domain::BlockWindow;
use crate::error::{ConfigError, Result};

/// Overrides `chain.rpc_url`.
pub const ENV_RPC_URL: &str = "MARKETLENS_RPC_URL";
/// Overrides `chain.contract_address`.
pub const ENV_CONTRACT_ADDRESS: &str = "MARKETLENS_CONTRACT_ADDRESS";
/// Overrides `metadata.api_url`.
pub const ENV_METADATA_URL: &str = "MARKETLENS_METADATA_URL";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Event log endpoint and contract.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Market metadata API.
    #[serde(default)]
    pub metadata: MetadataConfig,

    /// Projection TTLs and cache behaviour.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content, apply environment overrides and
    /// validate.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., a missing contract address)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Replace deployment-specific values with those found by `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = get(ENV_RPC_URL) {
            self.chain.rpc_url = url;
        }
        if let Some(address) = get(ENV_CONTRACT_ADDRESS) {
            self.chain.contract_address = address;
        }
        if let Some(url) = get(ENV_METADATA_URL) {
            self.metadata.api_url = url;
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        validate_url("chain.rpc_url", &self.chain.rpc_url)?;
        validate_url("metadata.api_url", &self.metadata.api_url)?;

        if self.chain.contract_address.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "chain.contract_address",
            }
            .into());
        }
        if let Err(e) = self.chain.contract_address.parse::<Address>() {
            return Err(ConfigError::InvalidValue {
                field: "chain.contract_address",
                reason: e.to_string(),
            }
            .into());
        }
        if self.chain.block_time_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chain.block_time_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.chain.log_chunk_size == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "chain.log_chunk_size",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }
        if self.chain.timeout_ms == 0 || self.metadata.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.metadata.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "metadata.connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.metadata.default_token.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "metadata.default_token",
            }
            .into());
        }
        if self.metadata.default_network_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "metadata.default_network_id",
            }
            .into());
        }

        let cache = &self.cache;
        for (field, ttl) in [
            ("cache.activity_ttl_secs", cache.activity_ttl_secs),
            ("cache.holders_ttl_secs", cache.holders_ttl_secs),
            ("cache.ranking_ttl_secs", cache.ranking_ttl_secs),
            ("cache.metadata_ttl_secs", cache.metadata_ttl_secs),
        ] {
            if ttl == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }
        if cache.max_entries == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "cache.max_entries",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }

        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind",
                reason: format!("not a socket address: {}", self.server.bind),
            }
            .into());
        }

        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Settings for the analytics service.
    #[must_use]
    pub fn analytics_settings(&self) -> AnalyticsSettings {
        AnalyticsSettings {
            ttls: self.cache.ttls(),
            window: BlockWindow::new(self.chain.block_time_secs),
            default_token: self.metadata.default_token.clone(),
            default_network_id: self.metadata.default_network_id.clone(),
        }
    }
}

#[allow(clippy::result_large_err)]
fn validate_url(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const CONTRACT: &str = "0x1111111111111111111111111111111111111111";

    fn parse(content: &str) -> Result<Config> {
        let mut config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|_| None);
        config.validate()?;
        Ok(config)
    }

    fn minimal() -> String {
        format!("[chain]\ncontract_address = \"{CONTRACT}\"\n")
    }

    fn assert_invalid(result: Result<Config>, expected: &str) {
        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, expected);
            }
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse(&minimal()).unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.chain.block_time_secs, 5);
        assert_eq!(config.chain.log_chunk_size, None);
        assert_eq!(config.metadata.default_token, "USDT");
        assert_eq!(config.metadata.default_network_id, "11142220");
        assert_eq!(config.cache.ranking_ttl_secs, 3600);
        assert!(config.cache.single_flight);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn missing_contract_address_is_rejected() {
        assert!(matches!(
            parse(""),
            Err(Error::Config(ConfigError::MissingField {
                field: "chain.contract_address"
            }))
        ));
    }

    #[test]
    fn malformed_contract_address_is_rejected() {
        assert_invalid(
            parse("[chain]\ncontract_address = \"0xnope\"\n"),
            "chain.contract_address",
        );
    }

    #[test]
    fn zero_block_time_is_rejected() {
        let content = format!("{}block_time_secs = 0\n", minimal());
        assert_invalid(parse(&content), "chain.block_time_secs");
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let content = format!("{}[cache]\nholders_ttl_secs = 0\n", minimal());
        assert_invalid(parse(&content), "cache.holders_ttl_secs");
    }

    #[test]
    fn zero_connect_timeout_is_rejected() {
        let content = format!("{}[metadata]\nconnect_timeout_ms = 0\n", minimal());
        assert_invalid(parse(&content), "metadata.connect_timeout_ms");
    }

    #[test]
    fn empty_metadata_url_is_missing() {
        let content = format!("{}[metadata]\napi_url = \"\"\n", minimal());
        assert!(matches!(
            parse(&content),
            Err(Error::Config(ConfigError::MissingField {
                field: "metadata.api_url"
            }))
        ));
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let content = format!("{}[server]\nbind = \"localhost\"\n", minimal());
        assert_invalid(parse(&content), "server.bind");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            parse("[chain\n"),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn overrides_replace_deployment_values() {
        let mut config: Config = toml::from_str(&minimal()).unwrap();
        config.apply_overrides(|key| match key {
            ENV_RPC_URL => Some("http://localhost:8545".into()),
            ENV_CONTRACT_ADDRESS => Some("0x2222222222222222222222222222222222222222".into()),
            ENV_METADATA_URL => Some("   ".into()),
            _ => None,
        });

        assert_eq!(config.chain.rpc_url, "http://localhost:8545");
        assert_eq!(
            config.chain.contract_address,
            "0x2222222222222222222222222222222222222222"
        );
        assert_eq!(config.metadata.api_url, MetadataConfig::default().api_url);
    }

    #[test]
    fn analytics_settings_follow_config() {
        let content = format!(
            "{}block_time_secs = 2\n[cache]\nactivity_ttl_secs = 60\n[metadata]\ndefault_token = \"USDC\"\n",
            minimal()
        );
        let settings = parse(&content).unwrap().analytics_settings();

        assert_eq!(settings.ttls.activity.as_secs(), 60);
        assert_eq!(settings.window, BlockWindow::new(2));
        assert_eq!(settings.default_token, "USDC");
    }
}
