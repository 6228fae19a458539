//! Application Layer - Services wiring domain logic to the ports
//!
//! - `catalog_service`: per-chain memoized catalog store with request
//!   coalescing
//! - `selector`: windowed token selection list with async per-row balances
//! - `debounce`: timer-based debounce for filter-query input

pub mod catalog_service;
pub mod debounce;
pub mod selector;

pub use catalog_service::{CatalogError, CatalogService, ChainSpec};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use selector::{BalanceState, BalanceUpdate, Row, TokenSelector, BALANCE_DISPLAY_SCALE};
