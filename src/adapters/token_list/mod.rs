//! Token List Adapter
//!
//! HTTP implementation of `TokenSourcePort`: fetches the raw token list for
//! a chain from its configured token-list URL.

mod client;

pub use client::{HttpTokenSource, TokenListConfig};
