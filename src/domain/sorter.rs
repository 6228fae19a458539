//! Priority Sorter
//!
//! Orders a catalog so curated "known good" tokens (native asset first,
//! then the per-chain priority set) come before everything else. Tokens
//! absent from the priority list keep their original feed order: feed order
//! often encodes the source's own relevance ranking, so the tie-break is a
//! contract here, not an accident. This does make the tail ordering depend
//! on an undocumented property of the feed provider.

use serde::{Deserialize, Serialize};

use super::catalog::CatalogEntry;
use super::token::Address;

/// Fixed, per-chain address precedence. Static configuration data; by
/// convention the native sentinel sits at index 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityList(Vec<Address>);

impl PriorityList {
    pub fn new(addresses: Vec<Address>) -> Self {
        Self(addresses)
    }

    /// Native sentinel first, then the given curated addresses.
    pub fn with_native(addresses: impl IntoIterator<Item = Address>) -> Self {
        let mut list = vec![Address::zero()];
        list.extend(addresses);
        Self(list)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn index_of(&self, address: &Address) -> Option<usize> {
        self.0.iter().position(|a| a == address)
    }
}

/// Stable sort: priority members first in priority-index order, everything
/// else after in input order. Empty priority list is the identity.
/// Idempotent: re-sorting an already sorted catalog changes nothing.
pub fn sort_by_priority(entries: &mut [CatalogEntry], priority: &PriorityList) {
    if priority.is_empty() {
        return;
    }
    entries.sort_by_key(|e| priority.index_of(&e.token.address).unwrap_or(usize::MAX));
}
