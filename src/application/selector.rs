//! Token selector
//!
//! Drives the selection list: filters the catalog by the (debounced) query,
//! windows the filtered rows, and resolves the viewer's balance for each
//! visible row asynchronously. Balance lookups never block row computation;
//! an unresolved balance is a loading placeholder and a failed lookup marks
//! only its own row. Selecting a row hands back the raw feed entry so the
//! host keeps any dapp-specific fields.
//!
//! Cancellation: switching catalogs (chain switch) or closing the selector
//! aborts in-flight lookups and bumps a generation counter; a late update
//! stamped with a superseded generation is discarded, so it can never paint
//! a now-irrelevant row.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::{filter, Address, Catalog, ListWindow, RawTokenEntry, Token};
use crate::ports::BalancePort;

/// Display scale for balances, matching the list's number formatting.
pub const BALANCE_DISPLAY_SCALE: usize = 6;

/// Per-row balance resolution state.
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceState {
    /// Lookup in flight; the row renders a placeholder.
    Loading,
    /// Decimals-adjusted balance, ready to display.
    Ready(f64),
    /// Lookup failed; isolated to this row.
    Failed,
}

impl BalanceState {
    pub fn is_loading(&self) -> bool {
        matches!(self, BalanceState::Loading)
    }

    /// Text for a fixed-width list cell.
    pub fn display(&self) -> String {
        match self {
            BalanceState::Loading => "...".to_string(),
            BalanceState::Ready(value) => format!("{:.*}", BALANCE_DISPLAY_SCALE, value),
            BalanceState::Failed => "-".to_string(),
        }
    }
}

/// A resolved (or pending) balance for one token, stamped with the selector
/// generation that requested it.
#[derive(Debug, Clone)]
pub struct BalanceUpdate {
    pub generation: u64,
    pub address: Address,
    pub state: BalanceState,
}

/// One visible row of the selection list.
#[derive(Debug, Clone)]
pub struct Row {
    /// Index into the current filtered sequence; feed to `select`.
    pub index: usize,
    pub token: Token,
    pub balance: BalanceState,
}

/// Windowed, balance-resolving view over one chain's catalog.
pub struct TokenSelector<B> {
    balances: Arc<B>,
    account: Address,
    window: ListWindow,
    catalog: Arc<Catalog>,
    query: String,
    generation: u64,
    resolved: HashMap<Address, BalanceState>,
    in_flight: HashSet<Address>,
    tasks: Vec<JoinHandle<()>>,
    updates_tx: mpsc::UnboundedSender<BalanceUpdate>,
}

impl<B: BalancePort + 'static> TokenSelector<B> {
    /// Open a selector over `catalog` for `account`. Balance updates arrive
    /// on the returned receiver; feed them back through `apply_update`.
    pub fn new(
        catalog: Arc<Catalog>,
        account: Address,
        balances: Arc<B>,
        window: ListWindow,
    ) -> (Self, mpsc::UnboundedReceiver<BalanceUpdate>) {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        (
            Self {
                balances,
                account,
                window,
                catalog,
                query: String::new(),
                generation: 0,
                resolved: HashMap::new(),
                in_flight: HashSet::new(),
                tasks: Vec::new(),
                updates_tx,
            },
            updates_rx,
        )
    }

    /// Set the active filter query. Typically wired from a `Debouncer`'s
    /// settled channel rather than raw keystrokes.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of rows the current query matches.
    pub fn filtered_len(&self) -> usize {
        filter(self.catalog.entries(), &self.query).len()
    }

    /// Rows intersecting the viewport (plus overscan), spawning a balance
    /// lookup for each visible token not yet resolved or in flight.
    pub fn rows(&mut self, scroll_top: u32, viewport_height: u32) -> Vec<Row> {
        // Hold the catalog through a local handle so spawning lookups below
        // does not fight the borrow on `self`.
        let catalog = self.catalog.clone();
        let filtered = filter(catalog.entries(), &self.query);
        let range = self
            .window
            .visible_range(scroll_top, viewport_height, filtered.len());

        self.tasks.retain(|task| !task.is_finished());

        let mut rows = Vec::with_capacity(range.len());
        for index in range {
            let entry = filtered[index];
            let address = entry.token.address.clone();
            let balance = match self.resolved.get(&address) {
                Some(state) => state.clone(),
                None => {
                    if self.in_flight.insert(address.clone()) {
                        self.spawn_lookup(entry.token.clone());
                    }
                    BalanceState::Loading
                }
            };
            rows.push(Row {
                index,
                token: entry.token.clone(),
                balance,
            });
        }
        rows
    }

    fn spawn_lookup(&mut self, token: Token) {
        let balances = self.balances.clone();
        let account = self.account.clone();
        let chain_id = self.catalog.chain_id;
        let generation = self.generation;
        let tx = self.updates_tx.clone();

        self.tasks.push(tokio::spawn(async move {
            let state = match balances.balance_of(chain_id, &account, &token).await {
                Ok(base_units) => BalanceState::Ready(token.amount_ui(base_units)),
                Err(err) => {
                    tracing::warn!(symbol = %token.symbol, error = %err, "balance lookup failed");
                    BalanceState::Failed
                }
            };
            let _ = tx.send(BalanceUpdate {
                generation,
                address: token.address.clone(),
                state,
            });
        }));
    }

    /// Apply a balance update. Returns false (and changes nothing) when the
    /// update belongs to a superseded generation.
    pub fn apply_update(&mut self, update: BalanceUpdate) -> bool {
        if update.generation != self.generation {
            tracing::debug!(address = %update.address, "discarding stale balance update");
            return false;
        }
        self.in_flight.remove(&update.address);
        self.resolved.insert(update.address, update.state);
        true
    }

    /// The raw feed entry behind a visible row, by its filtered index. This
    /// is what a host passes on selection so dapp-specific fields survive.
    pub fn select(&self, index: usize) -> Option<RawTokenEntry> {
        filter(self.catalog.entries(), &self.query)
            .get(index)
            .map(|entry| entry.raw.clone())
    }

    /// Swap to another chain's catalog. Everything scoped to the previous
    /// catalog - query, resolved balances, in-flight lookups - is dropped.
    pub fn set_catalog(&mut self, catalog: Arc<Catalog>) {
        self.cancel_lookups();
        self.catalog = catalog;
        self.query.clear();
        self.resolved.clear();
    }

    /// Close the selector: abort in-flight lookups and stop accepting their
    /// late results.
    pub fn close(&mut self) {
        self.cancel_lookups();
    }

    fn cancel_lookups(&mut self) {
        self.generation += 1;
        for task in self.tasks.drain(..) {
            task.abort();
        }
        self.in_flight.clear();
    }
}

impl<B> Drop for TokenSelector<B> {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
