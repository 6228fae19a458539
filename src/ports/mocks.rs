//! Recording mocks for the port traits
//!
//! Deterministic, network-free implementations used by unit and integration
//! tests: programmable responses, call recording, and an optional artificial
//! delay so coalescing and cancellation windows can be exercised.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Address, RawTokenEntry, Token};

use super::balance::{BalanceError, BalancePort};
use super::token_source::{TokenSourceError, TokenSourcePort};

/// Mock token source with per-chain canned lists.
#[derive(Debug, Default)]
pub struct MockTokenSource {
    lists: Mutex<HashMap<u64, Vec<RawTokenEntry>>>,
    failures: Mutex<HashMap<u64, String>>,
    fetch_count: AtomicUsize,
    delay: Option<Duration>,
}

impl MockTokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the canned list for a chain.
    pub fn with_list(self, chain_id: u64, entries: Vec<RawTokenEntry>) -> Self {
        self.lists.lock().unwrap().insert(chain_id, entries);
        self
    }

    /// Builder method to make fetches for a chain fail.
    pub fn with_failure(self, chain_id: u64, message: &str) -> Self {
        self.failures.lock().unwrap().insert(chain_id, message.to_string());
        self
    }

    /// Builder method to delay every fetch, holding the coalescing window
    /// open for concurrent callers.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches actually issued.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Replace a failure with a canned list, for retry-after-failure tests.
    pub fn set_list(&self, chain_id: u64, entries: Vec<RawTokenEntry>) {
        self.failures.lock().unwrap().remove(&chain_id);
        self.lists.lock().unwrap().insert(chain_id, entries);
    }
}

#[async_trait]
impl TokenSourcePort for MockTokenSource {
    async fn fetch_token_list(&self, chain_id: u64) -> Result<Vec<RawTokenEntry>, TokenSourceError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.failures.lock().unwrap().get(&chain_id) {
            return Err(TokenSourceError::Http(message.clone()));
        }
        self.lists
            .lock()
            .unwrap()
            .get(&chain_id)
            .cloned()
            .ok_or(TokenSourceError::UnknownChain(chain_id))
    }
}

/// Mock balance port with per-address balances and failures.
#[derive(Debug, Default)]
pub struct MockBalances {
    balances: Mutex<HashMap<Address, u128>>,
    failures: Mutex<HashMap<Address, String>>,
    calls: Mutex<Vec<Address>>,
    delay: Option<Duration>,
}

impl MockBalances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the balance for a token address.
    pub fn with_balance(self, address: &str, base_units: u128) -> Self {
        self.balances.lock().unwrap().insert(Address::new(address), base_units);
        self
    }

    /// Builder method to make lookups for a token address fail.
    pub fn with_failure(self, address: &str, message: &str) -> Self {
        self.failures.lock().unwrap().insert(Address::new(address), message.to_string());
        self
    }

    /// Builder method to delay every lookup.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Token addresses looked up, in call order.
    pub fn calls(&self) -> Vec<Address> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BalancePort for MockBalances {
    async fn balance_of(
        &self,
        _chain_id: u64,
        _account: &Address,
        token: &Token,
    ) -> Result<u128, BalanceError> {
        self.calls.lock().unwrap().push(token.address.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.failures.lock().unwrap().get(&token.address) {
            return Err(BalanceError::Rpc(message.clone()));
        }
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(&token.address)
            .copied()
            .unwrap_or(0))
    }
}
