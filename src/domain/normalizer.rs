//! Token Normalizer
//!
//! Maps heterogeneous raw token-list JSON into the canonical `Token` shape.
//! Known feed shapes are modeled as explicit variants so malformed-feed
//! handling is exhaustive rather than duck-typed:
//!
//! - `Inline`: the standard token-list row (`{symbol, address, decimals,
//!   name?, logoURI?}`)
//! - `Wrapped`: Pangolin-style rows that nest the payload under `tokenInfo`
//!
//! Rows without a symbol are logged and dropped, never an error. Rows whose
//! address is the native placeholder (empty or zero) resolve to the chain's
//! configured native descriptor regardless of what the feed put there.

use serde::{Deserialize, Serialize};

use super::token::{Address, NativeToken, Token};

/// Payload common to every known feed shape.
///
/// All fields default so a partial row still deserializes; `normalize`
/// decides what is recoverable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTokenInfo {
    pub symbol: String,
    pub address: String,
    pub decimals: Option<u8>,
    pub name: Option<String>,
    #[serde(rename = "logoURI", alias = "logoUrl")]
    pub logo_uri: Option<String>,
}

/// One raw token-list entry, one variant per known feed shape.
///
/// `Wrapped` must come first: untagged deserialization takes the first
/// matching variant, and a wrapped row would otherwise match `Inline` with
/// every field defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTokenEntry {
    Wrapped {
        #[serde(rename = "tokenInfo")]
        token_info: RawTokenInfo,
    },
    Inline(RawTokenInfo),
}

impl RawTokenEntry {
    pub fn info(&self) -> &RawTokenInfo {
        match self {
            RawTokenEntry::Wrapped { token_info } => token_info,
            RawTokenEntry::Inline(info) => info,
        }
    }
}

/// Decimals assumed when a feed omits them (the EVM default).
pub const DEFAULT_DECIMALS: u8 = 18;

/// Normalize one raw entry into a canonical token.
///
/// Returns `None` for entries with no symbol; these are logged at `debug`
/// and omitted from the catalog rather than surfacing as an error. Pure
/// apart from that logging.
pub fn normalize(raw: &RawTokenEntry, native: &NativeToken) -> Option<Token> {
    let info = raw.info();
    let address = Address::new(info.address.clone());

    if address.is_native_placeholder() {
        // Feeds disagree on how the native row looks; always use ours.
        return Some(native.to_token());
    }

    if info.symbol.trim().is_empty() {
        tracing::debug!(address = %address, "dropping token-list entry without symbol");
        return None;
    }

    Some(Token {
        address,
        symbol: info.symbol.clone(),
        decimals: info.decimals.unwrap_or(DEFAULT_DECIMALS),
        logo_url: info.logo_uri.clone().unwrap_or_default(),
    })
}

/// Normalize a whole feed, keeping each surviving row's raw entry alongside
/// its canonical token. Logs a summary when rows were dropped.
pub fn normalize_list(
    raw_entries: Vec<RawTokenEntry>,
    native: &NativeToken,
) -> Vec<(Token, RawTokenEntry)> {
    let total = raw_entries.len();
    let normalized: Vec<(Token, RawTokenEntry)> = raw_entries
        .into_iter()
        .filter_map(|raw| normalize(&raw, native).map(|token| (token, raw)))
        .collect();

    let dropped = total - normalized.len();
    if dropped > 0 {
        tracing::warn!(total, dropped, "dropped malformed token-list entries");
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native() -> NativeToken {
        NativeToken {
            symbol: "MATIC".to_string(),
            decimals: 18,
            logo_url: "https://example.com/matic.png".to_string(),
        }
    }

    fn inline(symbol: &str, address: &str, decimals: Option<u8>) -> RawTokenEntry {
        RawTokenEntry::Inline(RawTokenInfo {
            symbol: symbol.to_string(),
            address: address.to_string(),
            decimals,
            name: None,
            logo_uri: None,
        })
    }

    #[test]
    fn test_normalize_inline_entry() {
        let token = normalize(&inline("USDC", "0xA", Some(6)), &native()).unwrap();
        assert_eq!(token.symbol, "USDC");
        assert_eq!(token.decimals, 6);
        assert_eq!(token.address, Address::new("0xA"));
    }

    #[test]
    fn test_normalize_drops_missing_symbol() {
        assert!(normalize(&inline("", "0xB", Some(18)), &native()).is_none());
        assert!(normalize(&inline("   ", "0xB", Some(18)), &native()).is_none());
    }

    #[test]
    fn test_normalize_defaults_decimals() {
        let token = normalize(&inline("WETH", "0xC", None), &native()).unwrap();
        assert_eq!(token.decimals, DEFAULT_DECIMALS);
    }

    #[test]
    fn test_native_placeholder_uses_configured_descriptor() {
        // The feed's own symbol/logo for the native row must be ignored.
        let feed_native = RawTokenEntry::Inline(RawTokenInfo {
            symbol: "WRONG".to_string(),
            address: String::new(),
            decimals: Some(9),
            name: Some("Wrong Name".to_string()),
            logo_uri: Some("https://example.com/wrong.png".to_string()),
        });
        let token = normalize(&feed_native, &native()).unwrap();
        assert_eq!(token, native().to_token());

        let zero = inline("ALSO_WRONG", super::super::token::ZERO_ADDRESS, Some(18));
        assert_eq!(normalize(&zero, &native()).unwrap(), native().to_token());
    }

    #[test]
    fn test_wrapped_variant_deserializes() {
        let json = r#"{"tokenInfo":{"symbol":"PNG","address":"0x60781C2586D68229fde47564546784ab3fACA982","decimals":18,"logoURI":"https://example.com/png.png"}}"#;
        let raw: RawTokenEntry = serde_json::from_str(json).unwrap();
        assert!(matches!(raw, RawTokenEntry::Wrapped { .. }));
        assert_eq!(raw.info().symbol, "PNG");
    }

    #[test]
    fn test_inline_variant_accepts_logo_url_alias() {
        let json = r#"{"symbol":"WGLMR","address":"0xAcc15dC74880C9944775448304B263D191c6077F","decimals":18,"logoUrl":"https://example.com/wglmr.png"}"#;
        let raw: RawTokenEntry = serde_json::from_str(json).unwrap();
        assert_eq!(raw.info().logo_uri.as_deref(), Some("https://example.com/wglmr.png"));
    }

    #[test]
    fn test_normalize_list_keeps_raw_and_drops_bad_rows() {
        let entries = vec![
            inline("USDC", "0xA", Some(6)),
            inline("", "0xB", None),
            inline("WETH", "0xC", Some(18)),
        ];
        let normalized = normalize_list(entries, &native());
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].0.symbol, "USDC");
        assert_eq!(normalized[1].0.symbol, "WETH");
        // Raw entries ride along untouched for downstream selection callbacks.
        assert_eq!(normalized[1].1.info().address, "0xC");
    }
}
