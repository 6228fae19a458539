//! Catalog - the normalized, ordered token list for one chain
//!
//! Owned by the catalog cache; consumers receive `Arc<Catalog>` read-only
//! views. A catalog is replaced wholesale on refetch, never partially
//! mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::normalizer::RawTokenEntry;
use super::token::{Address, Token};

/// One catalog row: the canonical token plus the raw feed entry it came
/// from. The raw entry is retained so selection can hand back dapp-specific
/// fields the host may still need downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub token: Token,
    pub raw: RawTokenEntry,
}

impl CatalogEntry {
    /// An entry synthesized by the catalog itself (native/wrapped
    /// completion) rather than taken from the feed. The raw side mirrors
    /// the canonical token so selection still returns a usable entry.
    pub fn synthetic(token: Token) -> Self {
        let raw = RawTokenEntry::Inline(super::normalizer::RawTokenInfo {
            symbol: token.symbol.clone(),
            address: token.address.as_str().to_string(),
            decimals: Some(token.decimals),
            name: None,
            logo_uri: if token.logo_url.is_empty() {
                None
            } else {
                Some(token.logo_url.clone())
            },
        });
        Self { token, raw }
    }
}

/// Ordered token catalog for one chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub chain_id: u64,
    entries: Vec<CatalogEntry>,
    pub fetched_at: DateTime<Utc>,
}

impl Catalog {
    pub fn new(chain_id: u64, entries: Vec<CatalogEntry>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            chain_id,
            entries,
            fetched_at,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.entries.iter().map(|e| &e.token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_address(&self, address: &Address) -> bool {
        self.entries.iter().any(|e| &e.token.address == address)
    }

    /// Resolve a host-selected token by exact address or, failing that, by
    /// case-insensitive symbol. This is how a dapp's preselected src/dst
    /// pair maps onto the catalog.
    pub fn find(&self, address_or_symbol: &str) -> Option<&CatalogEntry> {
        let as_address = Address::new(address_or_symbol);
        self.entries
            .iter()
            .find(|e| e.token.address == as_address)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.token.symbol.eq_ignore_ascii_case(address_or_symbol))
            })
    }

    /// Logo URL for a symbol, the callback contract trading widgets expect.
    /// Empty logos count as absent.
    pub fn logo_for_symbol(&self, symbol: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.token.symbol.eq_ignore_ascii_case(symbol) && !e.token.logo_url.is_empty())
            .map(|e| e.token.logo_url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: &str, address: &str, logo: &str) -> CatalogEntry {
        CatalogEntry::synthetic(Token {
            address: Address::new(address),
            symbol: symbol.to_string(),
            decimals: 18,
            logo_url: logo.to_string(),
        })
    }

    fn catalog() -> Catalog {
        Catalog::new(
            137,
            vec![
                entry("WMATIC", "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270", "https://x/wmatic.png"),
                entry("USDC", "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174", ""),
            ],
            Utc::now(),
        )
    }

    #[test]
    fn test_find_by_address_ignores_case() {
        let c = catalog();
        let found = c.find("0x2791bca1f2de4661ed88a30c99a7a9449aa84174").unwrap();
        assert_eq!(found.token.symbol, "USDC");
    }

    #[test]
    fn test_find_falls_back_to_symbol() {
        let c = catalog();
        assert_eq!(c.find("usdc").unwrap().token.symbol, "USDC");
        assert!(c.find("WETH").is_none());
    }

    #[test]
    fn test_address_match_wins_over_symbol() {
        // A row whose symbol happens to equal another row's address must not
        // shadow the address match.
        let c = Catalog::new(
            1,
            vec![entry("0xAA", "0xBB", ""), entry("TOK", "0xAA", "")],
            Utc::now(),
        );
        assert_eq!(c.find("0xAA").unwrap().token.symbol, "TOK");
    }

    #[test]
    fn test_logo_for_symbol_skips_empty() {
        let c = catalog();
        assert_eq!(c.logo_for_symbol("wmatic"), Some("https://x/wmatic.png"));
        assert_eq!(c.logo_for_symbol("USDC"), None);
    }

    #[test]
    fn test_contains_address() {
        let c = catalog();
        assert!(c.contains_address(&Address::new("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270")));
        assert!(!c.contains_address(&Address::zero()));
    }
}
