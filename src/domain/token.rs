//! Canonical token types
//!
//! `Address` is a case-insensitive EVM address wrapper: checksummed and
//! lowercased forms of the same address compare (and hash) equal. The zero
//! address is the well-known sentinel for a chain's native asset.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// The native-asset sentinel, distinct from any deployed ERC-20.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// EVM address with case-insensitive equality and hashing.
///
/// Stored as received (checksummed or not); no EIP-55 re-checksumming is
/// performed, equality semantics do not need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// The native-asset sentinel address.
    pub fn zero() -> Self {
        Self(ZERO_ADDRESS.to_string())
    }

    pub fn is_zero(&self) -> bool {
        self.0.eq_ignore_ascii_case(ZERO_ADDRESS)
    }

    /// True for the shapes feeds use to mark the native asset: an empty
    /// string or the zero address.
    pub fn is_native_placeholder(&self) -> bool {
        self.0.is_empty() || self.is_zero()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Canonical token record. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    /// May be empty when the feed carries no logo for the token.
    #[serde(default)]
    pub logo_url: String,
}

impl Token {
    pub fn is_native(&self) -> bool {
        self.address.is_zero()
    }

    /// Scale a base-unit amount for display.
    pub fn amount_ui(&self, base_units: u128) -> f64 {
        base_units as f64 / 10f64.powi(self.decimals as i32)
    }
}

/// Per-chain descriptor for the native asset.
///
/// Feeds are inconsistent about how they represent the native currency, so
/// the catalog always substitutes this configured descriptor for that row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeToken {
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub logo_url: String,
}

impl NativeToken {
    /// The canonical token for this descriptor, at the sentinel address.
    pub fn to_token(&self) -> Token {
        Token {
            address: Address::zero(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
            logo_url: self.logo_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_address_eq_ignores_case() {
        let checksummed = Address::new("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
        let lowered = Address::new("0x2791bca1f2de4661ed88a30c99a7a9449aa84174");
        assert_eq!(checksummed, lowered);
    }

    #[test]
    fn test_address_hash_agrees_with_eq() {
        let mut map = HashMap::new();
        map.insert(Address::new("0xABCDEF0000000000000000000000000000000001"), 1u32);
        assert_eq!(
            map.get(&Address::new("0xabcdef0000000000000000000000000000000001")),
            Some(&1)
        );
    }

    #[test]
    fn test_zero_address_is_native_placeholder() {
        assert!(Address::zero().is_native_placeholder());
        assert!(Address::new("").is_native_placeholder());
        assert!(!Address::new("0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174").is_native_placeholder());
    }

    #[test]
    fn test_amount_ui_scaling() {
        let token = Token {
            address: Address::new("0xA"),
            symbol: "USDC".to_string(),
            decimals: 6,
            logo_url: String::new(),
        };
        assert!((token.amount_ui(1_500_000) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_native_descriptor_to_token() {
        let native = NativeToken {
            symbol: "MATIC".to_string(),
            decimals: 18,
            logo_url: "https://example.com/matic.png".to_string(),
        };
        let token = native.to_token();
        assert!(token.is_native());
        assert_eq!(token.symbol, "MATIC");
        assert_eq!(token.decimals, 18);
    }
}
