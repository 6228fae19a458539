//! Filter Engine
//!
//! Narrows a catalog by a transient query string: case-insensitive symbol
//! substring, or exact case-insensitive address match. No fuzzy matching,
//! no tokenization, no pre-built index; catalogs are in the low thousands
//! of entries and a linear O(n * m) scan is fine at that scale.

use super::catalog::CatalogEntry;
use super::token::Address;

/// Filter a catalog's entries by `query`.
///
/// An empty or whitespace-only query returns every row. Rows are returned
/// by reference into the input slice; no tokens are copied.
pub fn filter<'a>(entries: &'a [CatalogEntry], query: &str) -> Vec<&'a CatalogEntry> {
    let query = query.trim();
    if query.is_empty() {
        return entries.iter().collect();
    }

    let needle = query.to_lowercase();
    let as_address = Address::new(query);
    entries
        .iter()
        .filter(|e| {
            e.token.symbol.to_lowercase().contains(&needle) || e.token.address == as_address
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::Token;

    fn entry(symbol: &str, address: &str) -> CatalogEntry {
        CatalogEntry::synthetic(Token {
            address: Address::new(address),
            symbol: symbol.to_string(),
            decimals: 18,
            logo_url: String::new(),
        })
    }

    fn entries() -> Vec<CatalogEntry> {
        vec![
            entry("USDC", "0xA"),
            entry("USDT", "0xB"),
            entry("WETH", "0xC"),
        ]
    }

    #[test]
    fn test_empty_query_returns_all_rows_by_reference() {
        let list = entries();
        let result = filter(&list, "");
        assert_eq!(result.len(), 3);
        // Reference-stable: rows point into the same catalog.
        assert!(std::ptr::eq(result[0], &list[0]));

        assert_eq!(filter(&list, "   ").len(), 3);
    }

    #[test]
    fn test_symbol_substring_is_case_insensitive() {
        let list = entries();
        let result = filter(&list, "usd");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].token.symbol, "USDC");
        assert_eq!(result[1].token.symbol, "USDT");

        assert_eq!(filter(&list, "Eth").len(), 1);
    }

    #[test]
    fn test_address_match_is_exact_and_case_insensitive() {
        let list = entries();
        let result = filter(&list, "0xc");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].token.symbol, "WETH");

        // Address prefixes are not a match; only exact equality counts.
        let list = vec![entry("AAA", "0xABCD")];
        assert!(filter(&list, "0xAB").is_empty());
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(filter(&entries(), "doge").is_empty());
    }
}
