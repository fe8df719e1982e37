//! Result hand-off between the renderer and whoever is waiting.
//!
//! Results travel through a single-slot FIFO channel drained by one consumer
//! task. An `await_confirm` caller parks a oneshot sender in the
//! [`PendingSlot`]; the consumer fulfils it exactly once and clears it.
//!
//! Every request gets an id, and every answer carries the id of the request
//! it was given for.

use std::sync::Mutex;

use tokio::sync::{mpsc, oneshot};
use zenith_api::ConfirmResult;

/// A user decision, tagged with the request it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Answer {
    pub request: u64,
    pub result: ConfirmResult,
}

/// Answers waiting for the consumer. One slot, so a burst of taps queues on
/// the dispatcher instead of piling up here.
pub(crate) fn channel() -> (mpsc::Sender<Answer>, mpsc::Receiver<Answer>) {
    mpsc::channel(1)
}

struct Pending {
    id: u64,
    tx: oneshot::Sender<ConfirmResult>,
}

/// At most one suspended caller per dialog.
#[derive(Default)]
pub(crate) struct PendingSlot {
    inner: Mutex<Option<Pending>>,
}

impl PendingSlot {
    /// Park the caller of request `id`, evicting any previous one.
    ///
    /// The evicted caller observes its receiver closing.
    pub fn register(&self, id: u64) -> oneshot::Receiver<ConfirmResult> {
        let (tx, rx) = oneshot::channel();
        let previous = self.lock().replace(Pending { id, tx });
        if let Some(previous) = previous {
            tracing::debug!(evicted = previous.id, id, "confirmation superseded");
        }
        rx
    }

    /// Drop the parked caller, if any. Returns whether one was parked.
    pub fn evict(&self) -> bool {
        let previous = self.lock().take();
        if let Some(previous) = &previous {
            tracing::debug!(evicted = previous.id, "confirmation superseded");
        }
        previous.is_some()
    }

    /// Hand `result` to the caller parked for request `id`. Returns whether
    /// it was delivered.
    pub fn resolve(&self, id: u64, result: ConfirmResult) -> bool {
        let pending = {
            let mut slot = self.lock();
            match slot.take() {
                Some(pending) if pending.id == id => pending,
                other => {
                    *slot = other;
                    return false;
                }
            }
        };
        // The caller may have stopped waiting; that's fine
        pending.tx.send(result).is_ok()
    }

    /// Clear the slot if it still belongs to `id`.
    pub fn cancel(&self, id: u64) -> bool {
        let mut slot = self.lock();
        if slot.as_ref().is_some_and(|p| p.id == id) {
            slot.take();
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Pending>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_delivers_once() {
        let slot = PendingSlot::default();
        let rx = slot.register(1);

        assert!(slot.resolve(1, ConfirmResult::Confirmed));
        assert!(!slot.resolve(1, ConfirmResult::Canceled));
        assert_eq!(rx.await.unwrap(), ConfirmResult::Confirmed);
    }

    #[tokio::test]
    async fn test_register_evicts_previous() {
        let slot = PendingSlot::default();
        let first = slot.register(1);
        let second = slot.register(2);

        assert!(first.await.is_err());
        assert!(slot.resolve(2, ConfirmResult::Canceled));
        assert_eq!(second.await.unwrap(), ConfirmResult::Canceled);
    }

    #[test]
    fn test_cancel_ignores_stale_id() {
        let slot = PendingSlot::default();
        let _first = slot.register(1);
        let _second = slot.register(2);

        assert!(!slot.cancel(1));
        assert!(slot.is_pending());
        assert!(slot.cancel(2));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_resolve_to_departed_caller() {
        let slot = PendingSlot::default();
        let rx = slot.register(1);
        drop(rx);

        assert!(!slot.resolve(1, ConfirmResult::Confirmed));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_resolve_ignores_other_request() {
        let slot = PendingSlot::default();
        let _rx = slot.register(2);

        assert!(!slot.resolve(1, ConfirmResult::Confirmed));
        assert!(slot.is_pending());
    }
}
