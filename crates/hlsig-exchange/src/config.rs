//! Application configuration.

use std::path::Path;
use std::time::Duration;

use hlsig_core::Network;
use hlsig_signer::{Address, KeySource, DEFAULT_SIGNATURE_CHAIN_ID};
use hlsig_telemetry::LogFormat;
use serde::{Deserialize, Serialize};

use crate::error::{ExchangeError, ExchangeResult};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "HLSIG_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Top-level configuration, read from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub network: Network,

    /// Overrides the network's default API base URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Domain chain id for user-signed actions (hex).
    #[serde(default = "default_signature_chain_id")]
    pub signature_chain_id: String,

    /// Vault or sub-account to trade for.
    #[serde(default)]
    pub vault_address: Option<String>,

    /// Account the key acts for (agent mode when it differs from the key).
    #[serde(default)]
    pub acting_account: Option<String>,

    /// When set, requests expire this many ms after their nonce.
    #[serde(default)]
    pub expires_after_ms: Option<u64>,

    /// Builder-deployed perp dexs whose instruments are loaded.
    #[serde(default)]
    pub builder_dexs: Vec<String>,

    /// Market order slippage (0.05 = 5%).
    #[serde(default = "default_slippage")]
    pub default_slippage: f64,

    /// Offline metadata snapshot (JSON); fetched from `/info` when unset.
    #[serde(default)]
    pub snapshot_path: Option<String>,

    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub key: KeySource,
}

fn default_signature_chain_id() -> String {
    DEFAULT_SIGNATURE_CHAIN_ID.to_string()
}

fn default_slippage() -> f64 {
    0.05
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            api_url: None,
            signature_chain_id: default_signature_chain_id(),
            vault_address: None,
            acting_account: None,
            expires_after_ms: None,
            builder_dexs: Vec::new(),
            default_slippage: default_slippage(),
            snapshot_path: None,
            http_timeout_ms: default_http_timeout_ms(),
            log_format: LogFormat::default(),
            key: KeySource::default(),
        }
    }
}

impl AppConfig {
    /// Load from `HLSIG_CONFIG` (or `config/default.toml`), falling back to defaults.
    pub fn load() -> ExchangeResult<Self> {
        let config_path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> ExchangeResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ExchangeError::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> ExchangeResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ExchangeError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ExchangeResult<()> {
        if !(0.0..1.0).contains(&self.default_slippage) {
            return Err(ExchangeError::Config(format!(
                "default_slippage must be in [0, 1): {}",
                self.default_slippage
            )));
        }
        hlsig_signer::typed_data::parse_chain_id(&self.signature_chain_id)
            .map_err(|e| ExchangeError::Config(e.to_string()))?;
        self.vault()?;
        self.acting_account()?;
        Ok(())
    }

    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.network.api_url())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn vault(&self) -> ExchangeResult<Option<Address>> {
        parse_optional_address("vault_address", self.vault_address.as_deref())
    }

    pub fn acting_account(&self) -> ExchangeResult<Option<Address>> {
        parse_optional_address("acting_account", self.acting_account.as_deref())
    }

    /// Expiry for a request with `nonce`, if an expiry window is configured.
    pub fn expires_after(&self, nonce: i64) -> Option<i64> {
        self.expires_after_ms
            .map(|window| nonce.saturating_add(i64::try_from(window).unwrap_or(i64::MAX)))
    }
}

fn parse_optional_address(name: &str, raw: Option<&str>) -> ExchangeResult<Option<Address>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e| ExchangeError::Config(format!("Invalid {name} {value}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.signature_chain_id, "0x66eee");
        assert_eq!(config.default_slippage, 0.05);
        assert_eq!(config.api_url(), "https://api.hyperliquid-testnet.xyz");
        assert_eq!(config.expires_after(1_000), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let config = AppConfig::from_toml(
            r#"
network = "mainnet"
vault_address = "0x1719884eb866cb12b2287399b15f7db5e7d775ea"
expires_after_ms = 60000
builder_dexs = ["xyz"]
log_format = "json"

[key]
kind = "file"
path = "/etc/hlsig/key"
"#,
        )
        .unwrap();

        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.api_url(), "https://api.hyperliquid.xyz");
        assert!(config.vault().unwrap().is_some());
        assert_eq!(config.acting_account().unwrap(), None);
        assert_eq!(config.expires_after(1_000), Some(61_000));
        assert_eq!(config.builder_dexs, vec!["xyz".to_string()]);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.key,
            KeySource::File {
                path: "/etc/hlsig/key".into()
            }
        );
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_api_url_override() {
        let config = AppConfig::from_toml(r#"api_url = "http://localhost:3001""#).unwrap();
        assert_eq!(config.api_url(), "http://localhost:3001");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            AppConfig::from_toml("default_slippage = 1.5"),
            Err(ExchangeError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_toml(r#"vault_address = "0x1234""#),
            Err(ExchangeError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_toml(r#"signature_chain_id = "zz""#),
            Err(ExchangeError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("network = \"devnet\""),
            Err(ExchangeError::Config(_))
        ));
    }

    #[test]
    fn test_empty_address_is_none() {
        let config = AppConfig::from_toml(r#"acting_account = """#).unwrap();
        assert_eq!(config.acting_account().unwrap(), None);
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
