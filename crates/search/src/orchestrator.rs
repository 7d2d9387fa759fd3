// crates/search/src/orchestrator.rs
//! Coordinates the single in-flight online search.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use jobtrack_core::RecordStore;
use jobtrack_types::IdentityKey;
use tokio::task::JoinHandle;

use crate::cancel::CancelSignal;
use crate::client::JobSource;
use crate::error::SearchError;
use crate::foreground::Foreground;
use crate::outcome::Outcome;

/// Identifier of one search invocation.
pub type SearchId = u64;

struct ActiveSearch {
    id: SearchId,
    signal: CancelSignal,
}

type Slot = Arc<Mutex<Option<ActiveSearch>>>;

fn lock_slot(slot: &Slot) -> MutexGuard<'_, Option<ActiveSearch>> {
    match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::error!("search slot mutex poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// Runs online searches one at a time and hands each outcome to the
/// foreground exactly once.
///
/// Starting a search closes the previous search's signal, so a superseded
/// search resolves as [`Outcome::Cancelled`] instead of delivering stale
/// results. The outcome callback always runs through [`Foreground`], never
/// on the background task.
pub struct SearchOrchestrator {
    source: Arc<dyn JobSource>,
    store: RecordStore,
    foreground: Arc<dyn Foreground>,
    current: Slot,
    next_id: AtomicU64,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn JobSource>, store: RecordStore, foreground: Arc<dyn Foreground>) -> Self {
        Self {
            source,
            store,
            foreground,
            current: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Start an online search for `term`.
    ///
    /// An empty (or all-whitespace) term is rejected before anything is
    /// spawned. Must be called from within a tokio runtime.
    pub fn start<F>(&self, term: &str, on_outcome: F) -> Result<SearchHandle, SearchError>
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        let term = term.trim().to_string();
        if term.is_empty() {
            return Err(SearchError::EmptyTerm);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let signal = CancelSignal::new();
        let previous = lock_slot(&self.current).replace(ActiveSearch {
            id,
            signal: signal.clone(),
        });
        if let Some(prev) = previous {
            if prev.signal.close() {
                tracing::info!(previous = prev.id, id, "superseded in-flight search cancelled");
            }
        }

        tracing::info!(id, source = self.source.name(), term = %term, "online search started");

        let source = Arc::clone(&self.source);
        let store = self.store.clone();
        let foreground = Arc::clone(&self.foreground);
        let slot = Arc::clone(&self.current);
        let task_signal = signal.clone();
        let task = tokio::spawn(async move {
            // The search runs in its own task so a panicking source still
            // resolves to an outcome here.
            let search = tokio::spawn({
                let signal = task_signal.clone();
                async move { run_search(source.as_ref(), &store, &term, &signal).await }
            });
            let outcome = match search.await {
                Ok(outcome) => outcome,
                Err(e) if task_signal.is_closed() => {
                    tracing::warn!(id, error = %e, "cancelled search task did not complete");
                    Outcome::Cancelled
                }
                Err(e) => {
                    tracing::error!(id, error = %e, "search task panicked");
                    Outcome::Failed(format!("search task panicked: {e}"))
                }
            };
            tracing::debug!(id, outcome = ?outcome_kind(&outcome), "online search resolved");

            foreground.dispatch(Box::new(move || {
                {
                    let mut current = lock_slot(&slot);
                    if current.as_ref().is_some_and(|a| a.id == id) {
                        current.take();
                    }
                }
                // A close that lands after the task resolved still wins.
                let outcome = if task_signal.is_closed() {
                    Outcome::Cancelled
                } else {
                    outcome
                };
                on_outcome(outcome);
            }));
        });

        Ok(SearchHandle { id, signal, task })
    }

    /// Cancel the in-flight search, if any. Safe to call any number of times.
    /// Returns true if this call closed a signal.
    pub fn cancel(&self) -> bool {
        match lock_slot(&self.current).as_ref() {
            Some(active) => {
                let closed = active.signal.close();
                if closed {
                    tracing::info!(id = active.id, "online search cancelled");
                }
                closed
            }
            None => false,
        }
    }

    /// Leaving online mode cancels whatever is still running.
    pub fn navigate_away(&self) -> bool {
        tracing::debug!("leaving online mode");
        self.cancel()
    }

    /// Whether a search has started and not yet been delivered.
    pub fn is_active(&self) -> bool {
        lock_slot(&self.current).is_some()
    }
}

fn outcome_kind(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Results(_) => "results",
        Outcome::Cancelled => "cancelled",
        Outcome::Failed(_) => "failed",
    }
}

/// Query the source, then drop anything already tracked locally.
///
/// Cancellation wins over both a late success and a late error. The store
/// lock is taken only for the snapshot, after the network call.
async fn run_search(
    source: &dyn JobSource,
    store: &RecordStore,
    term: &str,
    signal: &CancelSignal,
) -> Outcome {
    let result = source.search(term, signal).await;
    if signal.is_closed() {
        return Outcome::Cancelled;
    }
    let records = match result {
        Ok(records) => records,
        Err(e) if e.is_cancelled() => return Outcome::Cancelled,
        Err(e) => {
            tracing::warn!(error = %e, "online search failed");
            return Outcome::Failed(e.to_string());
        }
    };

    let mut seen: HashSet<IdentityKey> = store.snapshot().iter().map(|r| r.key()).collect();
    let mut fresh = Vec::with_capacity(records.len());
    for record in records {
        if signal.is_closed() {
            return Outcome::Cancelled;
        }
        if seen.insert(record.key()) {
            fresh.push(record);
        } else {
            tracing::debug!(title = %record.title, company = %record.company, "dropping already-tracked result");
        }
    }

    if signal.is_closed() {
        return Outcome::Cancelled;
    }
    Outcome::Results(fresh)
}

/// Handle to one started search.
#[derive(Debug)]
pub struct SearchHandle {
    id: SearchId,
    signal: CancelSignal,
    task: JoinHandle<()>,
}

impl SearchHandle {
    pub fn id(&self) -> SearchId {
        self.id
    }

    /// Cancel this particular search. Returns true if this call closed its signal.
    pub fn cancel(&self) -> bool {
        self.signal.close()
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.is_closed()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait until the background task has handed its outcome to the foreground.
    pub async fn wait(self) {
        if let Err(e) = self.task.await {
            tracing::error!(id = self.id, error = %e, "search task failed to complete");
        }
    }
}
