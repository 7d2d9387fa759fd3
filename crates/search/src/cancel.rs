// crates/search/src/cancel.rs
//! Single-use broadcast cancellation signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// A "stop" signal tied to one online search.
///
/// Clones share state. Closing is idempotent and safe from any number of
/// threads; once closed, every listener sees it closed forever. A signal is
/// never reopened: each search gets a fresh one.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    token: CancellationToken,
    closed: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the signal. Returns true only for the call that actually closed it.
    pub fn close(&self) -> bool {
        let first = !self.closed.swap(true, Ordering::AcqRel);
        self.token.cancel();
        first
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the signal is closed (immediately if it already is).
    pub async fn closed(&self) {
        self.token.cancelled().await
    }
}
