//! Domain Layer - Core catalog logic
//!
//! Pure types and logic with no I/O: raw feed entries, the canonical token
//! shape, and the normalize / sort / filter / window pipeline every
//! exchange front-end re-derives. All external interactions (token-list
//! HTTP fetches, balance lookups) happen through the ports layer.

pub mod catalog;
pub mod filter;
pub mod normalizer;
pub mod sorter;
pub mod token;
pub mod window;

pub use catalog::{Catalog, CatalogEntry};
pub use filter::filter;
pub use normalizer::{normalize, normalize_list, RawTokenEntry, RawTokenInfo, DEFAULT_DECIMALS};
pub use sorter::{sort_by_priority, PriorityList};
pub use token::{Address, NativeToken, Token, ZERO_ADDRESS};
pub use window::{ListWindow, DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT};
