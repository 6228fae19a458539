//! Adapters Layer - External System Implementations
//!
//! Implementations of the port traits:
//! - Token List: HTTP fetcher for per-chain token-list feeds
//! - RPC Balance: EVM JSON-RPC viewer-balance lookups
//! - CLI: command-line interface handlers

pub mod cli;
pub mod rpc_balance;
pub mod token_list;

pub use cli::CliApp;
pub use rpc_balance::{EvmRpcBalances, RpcBalanceConfig};
pub use token_list::{HttpTokenSource, TokenListConfig};
