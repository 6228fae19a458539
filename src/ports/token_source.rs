//! Token source port
//!
//! Abstracts where raw token lists come from. The production adapter is an
//! HTTP client hitting a fixed per-chain token-list URL; tests swap in a
//! recording mock.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::RawTokenEntry;

/// Errors a token source can surface. Kept transport-agnostic so the port
/// does not leak an HTTP client into the domain.
#[derive(Debug, Error)]
pub enum TokenSourceError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("unexpected status {0} from token list endpoint")]
    Status(u16),

    #[error("failed to parse token list: {0}")]
    Parse(String),

    #[error("no token list configured for chain {0}")]
    UnknownChain(u64),

    #[error("rate limited, try again later")]
    RateLimited,
}

/// One fetch per chain against a fixed token-list endpoint, returning the
/// feed's raw entries in feed order.
#[async_trait]
pub trait TokenSourcePort: Send + Sync {
    async fn fetch_token_list(&self, chain_id: u64) -> Result<Vec<RawTokenEntry>, TokenSourceError>;
}
