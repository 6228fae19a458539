//! EVM JSON-RPC balance adapter
//!
//! Resolves viewer balances for selector rows: `eth_getBalance` for the
//! native sentinel, `eth_call` of `balanceOf(address)` for ERC-20 rows.
//! One lookup per row; failures stay scoped to the row that asked.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Address, Token};
use crate::ports::{BalanceError, BalancePort};

/// `balanceOf(address)` function selector.
const BALANCE_OF_SELECTOR: &str = "0x70a08231";

/// Configuration for the JSON-RPC balance client.
#[derive(Debug, Clone)]
pub struct RpcBalanceConfig {
    /// JSON-RPC endpoint per chain id.
    pub endpoints: HashMap<u64, String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for RpcBalanceConfig {
    fn default() -> Self {
        Self {
            endpoints: HashMap::new(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl RpcBalanceConfig {
    /// Builder method to register a chain's RPC endpoint.
    pub fn with_endpoint(mut self, chain_id: u64, url: impl Into<String>) -> Self {
        self.endpoints.insert(chain_id, url.into());
        self
    }
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Balance client over EVM JSON-RPC.
#[derive(Debug, Clone)]
pub struct EvmRpcBalances {
    config: RpcBalanceConfig,
    http: Client,
}

impl EvmRpcBalances {
    pub fn new(config: RpcBalanceConfig) -> Result<Self, BalanceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BalanceError::Rpc(e.to_string()))?;

        Ok(Self { config, http })
    }

    async fn call(&self, endpoint: &str, body: serde_json::Value) -> Result<u128, BalanceError> {
        let response: RpcResponse = self
            .http
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| BalanceError::Rpc(e.to_string()))?
            .json()
            .await
            .map_err(|e| BalanceError::Parse(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(BalanceError::Rpc(format!(
                "RPC error {}: {}",
                error.code, error.message
            )));
        }

        let result = response
            .result
            .ok_or_else(|| BalanceError::Parse("no result in RPC response".to_string()))?;

        parse_hex_quantity(&result)
    }
}

#[async_trait]
impl BalancePort for EvmRpcBalances {
    async fn balance_of(
        &self,
        chain_id: u64,
        account: &Address,
        token: &Token,
    ) -> Result<u128, BalanceError> {
        let endpoint = self
            .config
            .endpoints
            .get(&chain_id)
            .ok_or(BalanceError::UnknownChain(chain_id))?;

        let body = if token.is_native() {
            native_balance_request(account)
        } else {
            erc20_balance_request(account, token)
        };

        self.call(endpoint, body).await
    }
}

fn native_balance_request(account: &Address) -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "eth_getBalance",
        "params": [account.as_str(), "latest"]
    })
}

fn erc20_balance_request(account: &Address, token: &Token) -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "eth_call",
        "params": [
            {
                "to": token.address.as_str(),
                "data": balance_call_data(account)
            },
            "latest"
        ]
    })
}

/// ABI-encoded `balanceOf(account)` calldata: the 4-byte selector plus the
/// account address left-padded to a 32-byte word.
fn balance_call_data(account: &Address) -> String {
    let hex = account
        .as_str()
        .strip_prefix("0x")
        .unwrap_or(account.as_str())
        .to_ascii_lowercase();
    format!("{BALANCE_OF_SELECTOR}{hex:0>64}")
}

/// Parse a hex quantity (`0x`-prefixed, possibly a full 32-byte word with
/// leading zeros) into base units.
fn parse_hex_quantity(raw: &str) -> Result<u128, BalanceError> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| BalanceError::Parse(format!("expected hex quantity, got '{raw}'")))?
        .trim_start_matches('0');

    if digits.is_empty() {
        return Ok(0);
    }
    if digits.len() > 32 {
        return Err(BalanceError::Parse("balance exceeds u128".to_string()));
    }
    u128::from_str_radix(digits, 16).map_err(|e| BalanceError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Address {
        Address::new("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
    }

    #[test]
    fn test_balance_call_data_layout() {
        let data = balance_call_data(&account());
        assert_eq!(data.len(), 10 + 64);
        assert!(data.starts_with("0x70a08231"));
        assert!(data.ends_with("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        // 12 zero bytes of left padding before the 20-byte address.
        assert_eq!(&data[10..34], "000000000000000000000000");
    }

    #[test]
    fn test_parse_hex_quantity() {
        assert_eq!(parse_hex_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_hex_quantity("0x").unwrap(), 0);
        assert_eq!(parse_hex_quantity("0x16345785d8a0000").unwrap(), 100_000_000_000_000_000);
        // A full eth_call word with leading zeros.
        assert_eq!(
            parse_hex_quantity(
                "0x00000000000000000000000000000000000000000000000000000000001e8480"
            )
            .unwrap(),
            2_000_000
        );
    }

    #[test]
    fn test_parse_hex_quantity_rejects_garbage_and_overflow() {
        assert!(parse_hex_quantity("123").is_err());
        assert!(parse_hex_quantity("0xzz").is_err());
        // 33 significant hex digits does not fit u128.
        let overflow = format!("0x1{}", "0".repeat(32));
        assert!(matches!(
            parse_hex_quantity(&overflow),
            Err(BalanceError::Parse(_))
        ));
    }

    #[test]
    fn test_native_request_uses_get_balance() {
        let body = native_balance_request(&account());
        assert_eq!(body["method"], "eth_getBalance");
        assert_eq!(body["params"][0], account().as_str());
    }

    #[test]
    fn test_erc20_request_uses_eth_call() {
        let token = Token {
            address: Address::new("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174"),
            symbol: "USDC".to_string(),
            decimals: 6,
            logo_url: String::new(),
        };
        let body = erc20_balance_request(&account(), &token);
        assert_eq!(body["method"], "eth_call");
        assert_eq!(body["params"][0]["to"], token.address.as_str());
        assert!(body["params"][0]["data"]
            .as_str()
            .unwrap()
            .starts_with(BALANCE_OF_SELECTOR));
    }

    #[tokio::test]
    async fn test_unknown_chain_is_an_error_without_a_request() {
        let balances = EvmRpcBalances::new(RpcBalanceConfig::default()).unwrap();
        let token = Token {
            address: Address::zero(),
            symbol: "ETH".to_string(),
            decimals: 18,
            logo_url: String::new(),
        };
        assert!(matches!(
            balances.balance_of(1, &account(), &token).await,
            Err(BalanceError::UnknownChain(1))
        ));
    }
}
