//! Loading overlay tied to the lifetime of a unit of work.
//!
//! Nested and concurrent `with_loading` calls on one handle are counted:
//! the overlay goes away only when the last in-flight block exits.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;
use zenith_api::DialogKind;

use crate::handle::{DialogHandle, HandleBase};
use crate::overlay::Overlay;
use crate::scope::UiScope;
use crate::visibility::VisibilityStore;

#[derive(Debug, Clone)]
pub struct LoadingDialog {
    base: HandleBase,
    in_flight: Arc<AtomicUsize>,
}

impl LoadingDialog {
    pub fn new(scope: &UiScope) -> Self {
        Self {
            base: HandleBase::new(scope, false),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Show the overlay while `block` runs.
    ///
    /// The overlay is shown before `block` starts. When `block` finishes,
    /// the exit is applied before its output is returned, whether that
    /// output is a value or an `Err`. If `block` panics or the returned
    /// future is dropped early, the exit is still scheduled.
    pub async fn with_loading<F>(&self, block: F) -> F::Output
    where
        F: Future,
    {
        // Arm before entering so a drop during the enter wait stays balanced.
        let guard = LoadingGuard {
            base: self.base.clone(),
            in_flight: self.in_flight.clone(),
            armed: true,
        };

        let in_flight = self.in_flight.clone();
        self.base
            .apply(move |visible| enter(visible, &in_flight))
            .await;

        let output = block.await;
        guard.release().await;
        output
    }

    /// Show the overlay with no associated work. Pair with [`DialogHandle::hide`].
    pub fn show_loading(&self) {
        self.base.show();
    }

    /// Number of `with_loading` blocks currently running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// What a renderer should draw, if anything.
    pub fn overlay(&self) -> Option<Overlay> {
        self.base.is_shown().then_some(Overlay::Loading)
    }
}

impl DialogHandle for LoadingDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::Loading
    }

    fn is_shown(&self) -> bool {
        self.base.is_shown()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.base.subscribe()
    }

    fn show(&self) {
        self.base.show();
    }

    fn hide(&self) {
        self.base.hide();
    }
}

fn enter(visible: &VisibilityStore, in_flight: &AtomicUsize) {
    let depth = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    tracing::debug!(depth, "loading enter");
    visible.set(true);
}

fn leave(visible: &VisibilityStore, in_flight: &AtomicUsize) {
    let previous = in_flight
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)))
        .unwrap_or_else(|n| n);
    tracing::debug!(depth = previous.saturating_sub(1), "loading leave");
    if previous <= 1 {
        visible.set(false);
    }
}

/// Pairs every enter with exactly one leave.
struct LoadingGuard {
    base: HandleBase,
    in_flight: Arc<AtomicUsize>,
    armed: bool,
}

impl LoadingGuard {
    async fn release(mut self) {
        self.armed = false;
        let in_flight = self.in_flight.clone();
        self.base
            .apply(move |visible| leave(visible, &in_flight))
            .await;
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("loading block abandoned, scheduling exit");
            let in_flight = self.in_flight.clone();
            self.base
                .schedule(move |visible| leave(visible, &in_flight));
        }
    }
}
