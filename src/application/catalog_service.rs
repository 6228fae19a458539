//! Catalog Cache
//!
//! Process-scoped service owning one catalog slot per chain. A slot is
//! either a ready `Arc<Catalog>` or an in-flight fetch that concurrent
//! callers join: at most one network request per chain is ever in flight,
//! and every waiter of an attempt observes the same resolved catalog or the
//! same rejection. A failed attempt clears its slot, so the next call
//! retries with a fresh fetch; the cache is never poisoned.
//!
//! Freshness is indefinite: entries live until `invalidate` /
//! `invalidate_all`. The service is injected into callers rather than
//! reached as ambient global state, and it does not validate wallet or
//! network preconditions - callers gate invocation on those themselves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::domain::{
    normalize_list, sort_by_priority, Catalog, CatalogEntry, NativeToken, PriorityList, Token,
};
use crate::ports::{TokenSourceError, TokenSourcePort};

/// Per-chain settings the catalog build needs: the native descriptor the
/// normalizer substitutes, the priority ordering, and the wrapped-native
/// token appended when the feed lacks it.
#[derive(Debug, Clone)]
pub struct ChainSpec {
    pub chain_id: u64,
    pub name: String,
    pub native: NativeToken,
    pub priority: PriorityList,
    pub wrapped: Option<Token>,
}

/// Cloneable so one rejection can be broadcast to every coalesced waiter.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("chain {0} is not configured")]
    UnknownChain(u64),

    #[error("token list fetch failed: {0}")]
    Fetch(String),
}

impl From<TokenSourceError> for CatalogError {
    fn from(err: TokenSourceError) -> Self {
        CatalogError::Fetch(err.to_string())
    }
}

type FetchResult = Result<Arc<Catalog>, CatalogError>;

#[derive(Debug)]
enum Slot {
    Ready(Arc<Catalog>),
    Pending(broadcast::Sender<FetchResult>),
}

/// Memoized, request-coalescing catalog store.
pub struct CatalogService<S> {
    source: Arc<S>,
    chains: HashMap<u64, ChainSpec>,
    slots: Arc<Mutex<HashMap<u64, Slot>>>,
}

impl<S: TokenSourcePort + 'static> CatalogService<S> {
    pub fn new(source: Arc<S>, chains: impl IntoIterator<Item = ChainSpec>) -> Self {
        Self {
            source,
            chains: chains.into_iter().map(|c| (c.chain_id, c)).collect(),
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn chain(&self, chain_id: u64) -> Option<&ChainSpec> {
        self.chains.get(&chain_id)
    }

    pub fn chains(&self) -> impl Iterator<Item = &ChainSpec> {
        self.chains.values()
    }

    /// The catalog for `chain_id`, fetching and building it on first access.
    ///
    /// Concurrent callers for the same chain coalesce onto one fetch. The
    /// fetch itself runs on a detached task, so a caller going away cannot
    /// strand the other waiters.
    pub async fn get_catalog(&self, chain_id: u64) -> FetchResult {
        let spec = self
            .chains
            .get(&chain_id)
            .ok_or(CatalogError::UnknownChain(chain_id))?
            .clone();

        let mut waiter = {
            let mut slots = self.slots.lock().unwrap();
            match slots.get(&chain_id) {
                Some(Slot::Ready(catalog)) => return Ok(catalog.clone()),
                Some(Slot::Pending(tx)) => tx.subscribe(),
                None => {
                    let (tx, rx) = broadcast::channel(1);
                    slots.insert(chain_id, Slot::Pending(tx.clone()));

                    let source = self.source.clone();
                    let slots = self.slots.clone();
                    tokio::spawn(async move {
                        let result = build_catalog(source.as_ref(), &spec).await;
                        {
                            let mut slots = slots.lock().unwrap();
                            match &result {
                                Ok(catalog) => {
                                    slots.insert(chain_id, Slot::Ready(catalog.clone()));
                                }
                                // Failed attempt: clear the slot so the next
                                // call starts a fresh fetch.
                                Err(_) => {
                                    slots.remove(&chain_id);
                                }
                            }
                        }
                        let _ = tx.send(result);
                    });
                    rx
                }
            }
        };

        match waiter.recv().await {
            Ok(result) => result,
            Err(_) => Err(CatalogError::Fetch("catalog fetch was interrupted".to_string())),
        }
    }

    /// Drop the cached catalog for one chain. An in-flight fetch is left to
    /// finish into the cache; only a ready catalog is discarded.
    pub fn invalidate(&self, chain_id: u64) {
        let mut slots = self.slots.lock().unwrap();
        if matches!(slots.get(&chain_id), Some(Slot::Ready(_))) {
            slots.remove(&chain_id);
            tracing::info!(chain_id, "invalidated cached catalog");
        }
    }

    pub fn invalidate_all(&self) {
        let mut slots = self.slots.lock().unwrap();
        slots.retain(|_, slot| matches!(slot, Slot::Pending(_)));
    }
}

/// Fetch, normalize, complete and sort one chain's catalog.
async fn build_catalog<S: TokenSourcePort>(source: &S, spec: &ChainSpec) -> FetchResult {
    let raw = source.fetch_token_list(spec.chain_id).await?;
    let feed_len = raw.len();

    let mut entries: Vec<CatalogEntry> = normalize_list(raw, &spec.native)
        .into_iter()
        .map(|(token, raw)| CatalogEntry { token, raw })
        .collect();

    // Feeds do not reliably carry the native or wrapped-native rows; the
    // catalog always exposes both.
    let native_token = spec.native.to_token();
    if !entries.iter().any(|e| e.token.address == native_token.address) {
        entries.push(CatalogEntry::synthetic(native_token));
    }
    if let Some(wrapped) = &spec.wrapped {
        if !entries.iter().any(|e| e.token.address == wrapped.address) {
            entries.push(CatalogEntry::synthetic(wrapped.clone()));
        }
    }

    sort_by_priority(&mut entries, &spec.priority);

    tracing::info!(
        chain_id = spec.chain_id,
        chain = %spec.name,
        feed_len,
        catalog_len = entries.len(),
        "built token catalog"
    );

    Ok(Arc::new(Catalog::new(spec.chain_id, entries, Utc::now())))
}
