//! twap-catalog - Chain-Aware Token Catalog Service
//!
//! The token catalog pipeline every DEX front-end re-derives, factored out:
//! fetch a chain's remote token list, normalize it into a canonical shape,
//! order it against a curated priority set, cache it with request
//! coalescing, and expose filtering plus a windowed selector with async
//! per-row balance resolution.
//!
//! # Modules
//!
//! - `domain`: Pure catalog logic (Token, Normalizer, Sorter, Filter, Window)
//! - `ports`: Trait abstractions (TokenSourcePort, BalancePort) and mocks
//! - `adapters`: External implementations (HTTP token lists, EVM RPC, CLI)
//! - `application`: CatalogService, TokenSelector, Debouncer
//! - `config`: Configuration loading and validation

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
