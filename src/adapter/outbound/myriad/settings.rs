//! Market metadata API configuration.

use serde::Deserialize;

/// Myriad REST API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    /// Base URL of the metadata API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Collateral token used when a listing request names none.
    #[serde(default = "default_token")]
    pub default_token: String,
    /// Network used when a listing request names none.
    #[serde(default = "default_network_id")]
    pub default_network_id: String,
}

fn default_api_url() -> String {
    "https://api-v1.staging.myriadprotocol.com".into()
}

const fn default_timeout_ms() -> u64 {
    5000
}

const fn default_connect_timeout_ms() -> u64 {
    2000
}

fn default_token() -> String {
    "USDT".into()
}

fn default_network_id() -> String {
    "11142220".into()
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            default_token: default_token(),
            default_network_id: default_network_id(),
        }
    }
}
