//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, these traits abstract:
//! - Token list acquisition (one HTTP GET per chain in production)
//! - Per-row balance lookups (EVM JSON-RPC in production)
//!
//! Hand-rolled recording mocks live in `mocks` and are kept public so
//! integration tests can reuse them.

pub mod balance;
pub mod mocks;
pub mod token_source;

pub use balance::{BalanceError, BalancePort};
pub use mocks::{MockBalances, MockTokenSource};
pub use token_source::{TokenSourceError, TokenSourcePort};
