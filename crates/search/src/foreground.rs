// crates/search/src/foreground.rs
//! Handoff from background tasks to the foreground execution context.
//!
//! Presentation code is single-threaded: background work never touches it
//! directly. Instead it dispatches a boxed closure, and the foreground loop
//! runs it when it drains its queue.

use tokio::sync::mpsc;

pub type ForegroundTask = Box<dyn FnOnce() + Send + 'static>;

/// Something that can run a closure on the foreground context.
pub trait Foreground: Send + Sync + 'static {
    fn dispatch(&self, task: ForegroundTask);
}

/// Sending half of the default foreground queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ForegroundQueue {
    tx: mpsc::UnboundedSender<ForegroundTask>,
}

/// Receiving half, owned by the foreground loop.
#[derive(Debug)]
pub struct ForegroundReceiver {
    rx: mpsc::UnboundedReceiver<ForegroundTask>,
}

/// Create a connected queue/receiver pair.
pub fn foreground_queue() -> (ForegroundQueue, ForegroundReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ForegroundQueue { tx }, ForegroundReceiver { rx })
}

impl Foreground for ForegroundQueue {
    fn dispatch(&self, task: ForegroundTask) {
        if self.tx.send(task).is_err() {
            tracing::warn!("foreground receiver dropped, discarding task");
        }
    }
}

impl ForegroundReceiver {
    /// Wait for the next task and run it. Returns false once every sender is gone.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run every task already queued without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_tasks_run_on_receiver_in_order() {
        let (queue, mut receiver) = foreground_queue();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let seen = Arc::clone(&seen);
            queue.dispatch(Box::new(move || seen.lock().unwrap().push(i)));
        }
        // nothing runs until the foreground drains
        assert!(seen.lock().unwrap().is_empty());

        assert!(receiver.run_next().await);
        assert_eq!(receiver.run_pending(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_run_next_ends_when_senders_dropped() {
        let (queue, mut receiver) = foreground_queue();
        drop(queue);
        assert!(!receiver.run_next().await);
    }

    #[test]
    fn test_dispatch_after_receiver_dropped_does_not_panic() {
        let (queue, receiver) = foreground_queue();
        drop(receiver);
        queue.dispatch(Box::new(|| {}));
    }
}
