//! Batched entity loading.
//!
//! Response trees resolve relationship fields one parent at a time, which
//! would issue one store query per row. A [`Loader`] coalesces every `load`
//! issued while the task keeps yielding into a single batch, hands the batch
//! fn a deduplicated key list, and distributes the fetched rows back to each
//! caller, repeated keys included. A batch fn failure fails every call in
//! that batch with the same error; a key with no matching row fails only the
//! calls that asked for it.
//!
//! Loaders are built per request (see [`crate::context::Loaders`]); a caching
//! loader memoizes outcomes for its lifetime, which is exactly one response
//! tree.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{LoadError, StoreError};

/// Cooperative yields a call waits before dispatching its batch.
const DEFAULT_YIELD_COUNT: usize = 10;

/// Pending keys that trigger an early dispatch.
const DEFAULT_MAX_BATCH_SIZE: usize = 200;

/// Batch fetch implemented once per relationship.
///
/// Receives the deduplicated keys of one batch in first-seen order and
/// returns whatever rows matched. Single-valued batch fns leave unmatched
/// keys out of the map; list-valued batch fns insert an empty `Vec` so that
/// "no related rows" is an answer, not an error.
pub trait BatchFn<K, V> {
    fn load(
        &mut self,
        keys: &[K],
    ) -> impl Future<Output = Result<HashMap<K, V>, StoreError>> + Send;
}

struct State<K, V> {
    next_token: usize,
    pending: Vec<(usize, K)>,
    completed: HashMap<usize, Result<V, LoadError>>,
    cache: Option<HashMap<K, Result<V, LoadError>>>,
}

/// Coalesces concurrent `load` calls into batched fetches.
pub struct Loader<K, V, F> {
    entity: &'static str,
    state: Arc<Mutex<State<K, V>>>,
    batch_fn: Arc<Mutex<F>>,
    yield_count: usize,
    max_batch_size: usize,
}

impl<K, V, F> Clone for Loader<K, V, F> {
    fn clone(&self) -> Self {
        Loader {
            entity: self.entity,
            state: Arc::clone(&self.state),
            batch_fn: Arc::clone(&self.batch_fn),
            yield_count: self.yield_count,
            max_batch_size: self.max_batch_size,
        }
    }
}

impl<K, V, F> Loader<K, V, F>
where
    K: Eq + Hash + Clone + Display + Send,
    V: Clone + Send,
    F: BatchFn<K, V> + Send,
{
    /// Loader that caches every outcome for its lifetime.
    ///
    /// `entity` names what the loader resolves; it shows up in missing-key
    /// errors and dispatch logs.
    pub fn new(entity: &'static str, batch_fn: F) -> Self {
        Self::build(entity, batch_fn, true)
    }

    /// Loader that refetches on every batch.
    ///
    /// For values that change underneath a request, like participant counts
    /// read back right after a join.
    pub fn without_cache(entity: &'static str, batch_fn: F) -> Self {
        Self::build(entity, batch_fn, false)
    }

    fn build(entity: &'static str, batch_fn: F, cached: bool) -> Self {
        Loader {
            entity,
            state: Arc::new(Mutex::new(State {
                next_token: 0,
                pending: Vec::new(),
                completed: HashMap::new(),
                cache: cached.then(HashMap::new),
            })),
            batch_fn: Arc::new(Mutex::new(batch_fn)),
            yield_count: DEFAULT_YIELD_COUNT,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Cooperative yields before a batch dispatches. Higher values widen the
    /// window in which unrelated resolvers can join the batch.
    pub fn with_yield_count(mut self, yield_count: usize) -> Self {
        self.yield_count = yield_count;
        self
    }

    /// Dispatch early once this many keys are pending.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Resolve one key, batched with every other load issued this window.
    pub async fn load(&self, key: K) -> Result<V, LoadError> {
        let mut state = self.state.lock().await;
        if let Some(cache) = &state.cache {
            if let Some(outcome) = cache.get(&key) {
                return outcome.clone();
            }
        }
        let token = state.next_token;
        state.next_token += 1;
        state.pending.push((token, key));
        let overflow = if state.pending.len() >= self.max_batch_size {
            Some(std::mem::take(&mut state.pending))
        } else {
            None
        };
        drop(state);

        if let Some(batch) = overflow {
            self.dispatch(batch).await;
        } else {
            for _ in 0..self.yield_count {
                tokio::task::yield_now().await;
            }
        }

        loop {
            let mut state = self.state.lock().await;
            if let Some(outcome) = state.completed.remove(&token) {
                return outcome;
            }
            if state.pending.iter().any(|(t, _)| *t == token) {
                let batch = std::mem::take(&mut state.pending);
                drop(state);
                self.dispatch(batch).await;
                continue;
            }
            drop(state);
            // Another call took our batch and is mid-fetch; wait for it.
            tokio::task::yield_now().await;
        }
    }

    /// Resolve many keys, preserving input order.
    pub async fn load_many(&self, keys: Vec<K>) -> Result<Vec<V>, LoadError> {
        let loads: Vec<_> = keys.into_iter().map(|key| self.load(key)).collect();
        let outcomes = futures::future::join_all(loads).await;
        outcomes.into_iter().collect()
    }

    async fn dispatch(&self, batch: Vec<(usize, K)>) {
        let mut keys: Vec<K> = Vec::with_capacity(batch.len());
        let mut seen: HashSet<K> = HashSet::with_capacity(batch.len());
        for (_, key) in &batch {
            if seen.insert(key.clone()) {
                keys.push(key.clone());
            }
        }

        tracing::debug!(
            entity = self.entity,
            keys = keys.len(),
            calls = batch.len(),
            "dispatching batch"
        );

        let result = {
            let mut batch_fn = self.batch_fn.lock().await;
            batch_fn.load(&keys).await
        };

        let mut state = self.state.lock().await;
        match result {
            Ok(values) => {
                for (token, key) in batch {
                    let outcome = values.get(&key).cloned().ok_or_else(|| LoadError::Missing {
                        entity: self.entity,
                        key: key.to_string(),
                    });
                    if let Some(cache) = &mut state.cache {
                        cache.entry(key).or_insert_with(|| outcome.clone());
                    }
                    state.completed.insert(token, outcome);
                }
            }
            Err(err) => {
                let err = LoadError::Fetch(Arc::new(err));
                for (token, key) in batch {
                    if let Some(cache) = &mut state.cache {
                        cache.entry(key).or_insert_with(|| Err(err.clone()));
                    }
                    state.completed.insert(token, Err(err.clone()));
                }
            }
        }
    }
}
