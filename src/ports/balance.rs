//! Balance port
//!
//! Per-row balance resolution for the selector list. Balances are returned
//! in base units; display scaling is the caller's concern (`Token::amount_ui`).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Address, Token};

#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("failed to parse balance: {0}")]
    Parse(String),

    #[error("no RPC endpoint configured for chain {0}")]
    UnknownChain(u64),
}

/// Viewer balance for one token. The native sentinel resolves the account's
/// native-currency balance; any other address resolves the ERC-20 balance.
#[async_trait]
pub trait BalancePort: Send + Sync {
    async fn balance_of(
        &self,
        chain_id: u64,
        account: &Address,
        token: &Token,
    ) -> Result<u128, BalanceError>;
}
