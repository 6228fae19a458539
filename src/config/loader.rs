//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml
//! structure: an `[http]` section for the fetch client and one `[[chain]]`
//! table per supported chain (token-list URL, RPC endpoint, native token
//! descriptor, priority addresses, wrapped-native token).

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::rpc_balance::RpcBalanceConfig;
use crate::adapters::token_list::TokenListConfig;
use crate::application::ChainSpec;
use crate::domain::{Address, NativeToken, PriorityList, Token};

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpSection,
    #[serde(rename = "chain")]
    pub chains: Vec<ChainSection>,
}

/// HTTP client configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    /// Token-list request timeout in seconds
    pub timeout_secs: u64,
    /// Balance RPC request timeout in seconds
    pub balance_timeout_secs: u64,
    /// Retry attempts for token-list fetches
    pub max_retries: u32,
    /// Base delay for retry backoff (milliseconds)
    pub retry_base_delay_ms: u64,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            balance_timeout_secs: 15,
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

/// One supported chain
#[derive(Debug, Clone, Deserialize)]
pub struct ChainSection {
    /// EVM chain id (137 = Polygon, 56 = BSC, ...)
    pub chain_id: u64,
    /// Display name, also used in logs
    pub name: String,
    /// Fixed token-list URL for this chain
    pub token_list_url: String,
    /// JSON-RPC endpoint for balance lookups
    pub rpc_url: String,
    /// Curated addresses sorted to the top of the catalog, in order.
    /// The native sentinel is implied at the front; do not list it here.
    #[serde(default)]
    pub priority: Vec<String>,
    /// Native asset descriptor substituted for the feed's native row
    pub native: NativeSection,
    /// Wrapped-native token appended when the feed lacks it
    #[serde(default)]
    pub wrapped: Option<WrappedSection>,
}

/// Native asset descriptor section
#[derive(Debug, Clone, Deserialize)]
pub struct NativeSection {
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub logo_url: String,
}

/// Wrapped-native token section
#[derive(Debug, Clone, Deserialize)]
pub struct WrappedSection {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub logo_url: String,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chains.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one [[chain]] must be configured".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for chain in &self.chains {
            if !seen.insert(chain.chain_id) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate chain_id {}",
                    chain.chain_id
                )));
            }

            if chain.name.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "chain {} has an empty name",
                    chain.chain_id
                )));
            }

            if chain.token_list_url.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "chain {} has an empty token_list_url",
                    chain.chain_id
                )));
            }

            if chain.rpc_url.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "chain {} has an empty rpc_url",
                    chain.chain_id
                )));
            }

            if chain.native.symbol.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "chain {} has an empty native symbol",
                    chain.chain_id
                )));
            }

            if let Some(wrapped) = &chain.wrapped {
                if wrapped.address.is_empty() || wrapped.symbol.is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "chain {} has an incomplete [chain.wrapped] section",
                        chain.chain_id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Per-chain specs for the catalog service.
    pub fn chain_specs(&self) -> Vec<ChainSpec> {
        self.chains.iter().map(ChainSection::to_spec).collect()
    }

    /// Token-list fetcher configuration.
    pub fn token_list_config(&self) -> TokenListConfig {
        let mut config = TokenListConfig {
            timeout: Duration::from_secs(self.http.timeout_secs),
            max_retries: self.http.max_retries,
            retry_base_delay_ms: self.http.retry_base_delay_ms,
            ..TokenListConfig::default()
        };
        for chain in &self.chains {
            config = config.with_url(chain.chain_id, chain.token_list_url.clone());
        }
        config
    }

    /// Balance RPC client configuration.
    pub fn rpc_balance_config(&self) -> RpcBalanceConfig {
        let mut config = RpcBalanceConfig {
            timeout: Duration::from_secs(self.http.balance_timeout_secs),
            ..RpcBalanceConfig::default()
        };
        for chain in &self.chains {
            config = config.with_endpoint(chain.chain_id, chain.rpc_url.clone());
        }
        config
    }
}

impl ChainSection {
    pub fn to_spec(&self) -> ChainSpec {
        ChainSpec {
            chain_id: self.chain_id,
            name: self.name.clone(),
            native: NativeToken {
                symbol: self.native.symbol.clone(),
                decimals: self.native.decimals,
                logo_url: self.native.logo_url.clone(),
            },
            priority: PriorityList::with_native(
                self.priority.iter().map(|a| Address::new(a.clone())),
            ),
            wrapped: self.wrapped.as_ref().map(|w| Token {
                address: Address::new(w.address.clone()),
                symbol: w.symbol.clone(),
                decimals: w.decimals,
                logo_url: w.logo_url.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[http]
timeout_secs = 10
max_retries = 2

[[chain]]
chain_id = 137
name = "quickswap"
token_list_url = "https://example.com/polygon.json"
rpc_url = "https://polygon-rpc.example.com"
priority = ["0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"]

[chain.native]
symbol = "MATIC"
decimals = 18
logo_url = "https://example.com/matic.png"

[chain.wrapped]
address = "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270"
symbol = "WMATIC"
decimals = 18
"#;

    fn parse(toml_str: &str) -> Config {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_load_config_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.chains.len(), 1);
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.http.max_retries, 2);
        // Defaults fill in what the file omits.
        assert_eq!(config.http.retry_base_delay_ms, 500);
        assert_eq!(config.chains[0].native.symbol, "MATIC");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_config("/nonexistent/config.toml"),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_chains() {
        let config: Config = toml::from_str("chain = []\n\n[http]\ntimeout_secs = 5").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_chain_ids() {
        let second = r#"
[[chain]]
chain_id = 137
name = "stellaswap"
token_list_url = "https://example.com/moonbeam.json"
rpc_url = "https://moonbeam-rpc.example.com"

[chain.native]
symbol = "GLMR"
decimals = 18
"#;
        let config = parse(&format!("{SAMPLE}{second}"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_chain_spec_conversion() {
        let config = parse(SAMPLE);
        let specs = config.chain_specs();
        assert_eq!(specs.len(), 1);

        let spec = &specs[0];
        assert_eq!(spec.chain_id, 137);
        assert_eq!(spec.native.decimals, 18);
        assert_eq!(spec.wrapped.as_ref().unwrap().symbol, "WMATIC");
        // Priority gets the native sentinel prepended.
        assert!(!spec.priority.is_empty());
    }

    #[test]
    fn test_adapter_configs_cover_every_chain() {
        let config = parse(SAMPLE);

        let token_list = config.token_list_config();
        assert_eq!(token_list.timeout, Duration::from_secs(10));
        assert!(token_list.urls.contains_key(&137));

        let rpc = config.rpc_balance_config();
        assert!(rpc.endpoints.contains_key(&137));
    }
}
