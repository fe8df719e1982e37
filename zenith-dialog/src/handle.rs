//! The capability every dialog variant exposes to caller code.

use tokio::sync::{oneshot, watch};

use zenith_api::DialogKind;

use crate::scope::UiScope;
use crate::visibility::VisibilityStore;

/// Query and toggle one modal overlay.
///
/// `show` and `hide` are scheduled on the owning [`UiScope`]; the new state
/// is observed eventually, and in the order the calls were made. Both are
/// idempotent: showing a shown dialog produces no transition.
pub trait DialogHandle {
    fn kind(&self) -> DialogKind;

    fn is_shown(&self) -> bool;

    fn subscribe(&self) -> watch::Receiver<bool>;

    fn show(&self);

    fn hide(&self);
}

/// Visibility store plus the scope allowed to mutate it.
#[derive(Debug, Clone)]
pub struct HandleBase {
    visible: VisibilityStore,
    scope: UiScope,
}

impl HandleBase {
    pub fn new(scope: &UiScope, visible: bool) -> Self {
        Self {
            visible: VisibilityStore::new(visible),
            scope: scope.clone(),
        }
    }

    pub fn scope(&self) -> &UiScope {
        &self.scope
    }

    pub fn visibility(&self) -> &VisibilityStore {
        &self.visible
    }

    pub fn is_shown(&self) -> bool {
        self.visible.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible.subscribe()
    }

    pub fn show(&self) {
        self.schedule(|visible| {
            visible.set(true);
        });
    }

    pub fn hide(&self) {
        self.schedule(|visible| {
            visible.set(false);
        });
    }

    /// Run `f` against the store on the dispatcher, without waiting.
    pub(crate) fn schedule<F>(&self, f: F)
    where
        F: FnOnce(&VisibilityStore) + Send + 'static,
    {
        let visible = self.visible.clone();
        self.scope.launch(async move { f(&visible) });
    }

    /// Run `f` against the store on the dispatcher and wait until it has run.
    ///
    /// Returns without running `f` if the scope is cancelled first.
    pub(crate) async fn apply<F>(&self, f: F)
    where
        F: FnOnce(&VisibilityStore) + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.schedule(move |visible| {
            f(visible);
            let _ = tx.send(());
        });
        let _ = rx.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_show_hide_are_eventual_and_ordered() {
        let scope = UiScope::new();
        let base = HandleBase::new(&scope, false);

        base.show();
        base.hide();
        base.show();
        scope.flush().await;
        assert!(base.is_shown());

        base.hide();
        scope.flush().await;
        assert!(!base.is_shown());
    }

    #[tokio::test]
    async fn test_show_twice_is_one_transition() {
        let scope = UiScope::new();
        let base = HandleBase::new(&scope, false);
        let mut rx = base.subscribe();

        base.show();
        scope.flush().await;
        assert!(*rx.borrow_and_update());

        base.show();
        scope.flush().await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_mutations_dropped_after_cancel() {
        let scope = UiScope::new();
        let base = HandleBase::new(&scope, false);

        scope.cancel();
        base.show();
        scope.flush().await;
        assert!(!base.is_shown());
    }
}
