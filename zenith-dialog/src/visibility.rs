//! The observable visibility flag behind every dialog handle.

use std::sync::Arc;

use tokio::sync::watch;

/// A single observable boolean.
///
/// Anyone may read or subscribe; only this crate writes, and only from the
/// owning scope's dispatcher (or a teardown path after it has stopped).
#[derive(Debug, Clone)]
pub struct VisibilityStore {
    tx: Arc<watch::Sender<bool>>,
}

impl VisibilityStore {
    pub fn new(visible: bool) -> Self {
        let (tx, _) = watch::channel(visible);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> bool {
        *self.tx.borrow()
    }

    /// Observe transitions. Writing the current value again is not a transition.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Returns true if the value changed.
    pub(crate) fn set(&self, visible: bool) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == visible {
                false
            } else {
                *current = visible;
                true
            }
        });
        if changed {
            tracing::trace!(visible, "visibility changed");
        }
        changed
    }
}
