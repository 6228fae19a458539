//! Balance Adapter
//!
//! EVM JSON-RPC implementation of `BalancePort` for per-row viewer
//! balances in the selector list.

mod client;

pub use client::{EvmRpcBalances, RpcBalanceConfig};
