//! Confirmation dialog: a two-outcome prompt caller code can await.
//!
//! # Protocol
//!
//! 1. A request publishes [`Visuals`] and shows the dialog.
//! 2. The renderer feeds [`ConfirmResult`]s in through a [`ConfirmResponder`].
//! 3. One consumer task per dialog drains results in order. For each it
//!    resumes the parked `await_confirm` caller (if any), runs the matching
//!    callback (if any), then hides the dialog.
//!
//! A request made while another is still unresolved cancels the first: its
//! awaiting caller gets [`DialogError::Superseded`] and the new visuals
//! replace the old ones.
//!
//! Each request is numbered. An answer counts only if it was given for the
//! newest request while that request is still waiting for input, so a
//! double tap or a tap on a replaced prompt is dropped.

mod callbacks;
mod rendezvous;

pub use callbacks::{Callback, ConfirmCallbacks};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use zenith_api::{ConfirmResult, DialogKind, DialogSnapshot, Visuals};

use crate::error::DialogError;
use crate::handle::{DialogHandle, HandleBase};
use crate::overlay::Overlay;
use crate::scope::UiScope;
use callbacks::CallbackRegistry;
use rendezvous::{Answer, PendingSlot};

/// Where a confirm dialog is in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPhase {
    /// Nothing shown.
    Idle,
    /// Shown, waiting for the user.
    AwaitingInput,
    /// A result arrived; callers and callbacks are being notified.
    Resolving,
}

struct Shared {
    base: HandleBase,
    visuals: watch::Sender<Visuals>,
    phase: Mutex<ConfirmPhase>,
    pending: PendingSlot,
    callbacks: CallbackRegistry,
    results: mpsc::Sender<Answer>,
    /// Newest request handed out. Bumped by the caller, before dispatch.
    issued: AtomicU64,
    /// Request whose visuals are published. Written on the dispatcher.
    published: Arc<AtomicU64>,
}

impl Shared {
    fn phase(&self) -> ConfirmPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_phase(&self, phase: ConfirmPhase) {
        let mut current = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        if *current != phase {
            tracing::trace!(from = ?*current, to = ?phase, "confirm phase");
            *current = phase;
        }
    }

    fn next_request(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Replace the visuals as a whole and show, on the dispatcher.
    ///
    /// Publishing the empty sentinel withdraws whatever was on screen.
    fn publish(self: &Arc<Self>, request: u64, visuals: Visuals) {
        let shared = self.clone();
        self.base.scope().launch(async move {
            let empty = visuals.is_empty();
            shared.published.store(request, Ordering::Release);
            shared.visuals.send_replace(visuals);
            if empty {
                tracing::debug!(request, "empty visuals published, hiding");
                shared.hide_now();
            } else {
                shared.show_now();
            }
        });
    }

    fn show(self: &Arc<Self>) {
        let shared = self.clone();
        self.base.scope().launch(async move { shared.show_now() });
    }

    fn hide(self: &Arc<Self>) {
        let shared = self.clone();
        self.base.scope().launch(async move { shared.hide_now() });
    }

    /// Only call on the dispatcher.
    fn show_now(&self) {
        if self.visuals.borrow().is_empty() {
            tracing::debug!("confirm dialog has no visuals, not showing");
            return;
        }
        self.base.visibility().set(true);
        self.set_phase(ConfirmPhase::AwaitingInput);
    }

    /// Only call on the dispatcher, or after it has stopped.
    fn hide_now(&self) {
        self.base.visibility().set(false);
        self.set_phase(ConfirmPhase::Idle);
    }

    fn deliver(self: &Arc<Self>, answer: Answer) {
        let Answer { request, result } = answer;
        let latest = self.issued.load(Ordering::Acquire);
        if request != latest || self.phase() != ConfirmPhase::AwaitingInput {
            tracing::debug!(request, latest, ?result, "stale confirmation, dropping");
            return;
        }
        self.set_phase(ConfirmPhase::Resolving);
        let resumed = self.pending.resolve(request, result);
        let fired = self.callbacks.fire(result);
        tracing::debug!(request, ?result, resumed, fired, "confirmation resolved");
        self.hide_resolved(request);
    }

    /// Hide after `request` resolved, unless a newer request took the dialog.
    fn hide_resolved(self: &Arc<Self>, request: u64) {
        let shared = self.clone();
        self.base.scope().launch(async move {
            if shared.issued.load(Ordering::Acquire) == request {
                shared.hide_now();
            }
        });
    }

    /// The parked caller `id` stopped waiting without a result.
    fn abandon(self: &Arc<Self>, id: u64) {
        if !self.pending.cancel(id) {
            return;
        }
        tracing::debug!(id, "confirmation abandoned");
        // Callback-driven flows own the dialog; leave it to them
        if !self.callbacks.is_empty() {
            return;
        }
        if self.base.scope().is_cancelled() {
            self.hide_now();
        } else {
            self.hide();
        }
    }
}

/// Feeds user decisions from the renderer into a [`ConfirmDialog`].
///
/// A responder from [`ConfirmDialog::responder`] answers whatever request is
/// on screen when its answer is dispatched. One taken from an
/// [`Overlay::Confirm`] is bound to the request that overlay shows.
#[derive(Debug, Clone)]
pub struct ConfirmResponder {
    scope: UiScope,
    results: mpsc::Sender<Answer>,
    published: Arc<AtomicU64>,
    request: Option<u64>,
}

impl ConfirmResponder {
    /// The confirm button was activated.
    pub fn confirm(&self) {
        self.resolve(ConfirmResult::Confirmed);
    }

    /// The dismiss button was activated, or the dialog was closed otherwise.
    pub fn dismiss(&self) {
        self.resolve(ConfirmResult::Canceled);
    }

    pub fn resolve(&self, result: ConfirmResult) {
        let results = self.results.clone();
        let published = self.published.clone();
        let bound = self.request;
        self.scope.launch(async move {
            let request = bound.unwrap_or_else(|| published.load(Ordering::Acquire));
            if results.send(Answer { request, result }).await.is_err() {
                tracing::debug!(?result, "confirm dialog gone, dropping result");
            }
        });
    }
}

/// Handle for one confirmation dialog site.
///
/// Reusable across any number of requests. Dropping it stops the consumer
/// task; cancelling its scope does the same and cancels a parked caller.
pub struct ConfirmDialog {
    shared: Arc<Shared>,
    consumer: JoinHandle<()>,
}

impl ConfirmDialog {
    pub fn new(scope: &UiScope, callbacks: ConfirmCallbacks) -> Self {
        Self::restore(scope, DialogSnapshot::default(), callbacks)
    }

    /// Recreate a dialog from state saved with [`ConfirmDialog::save`].
    pub fn restore(scope: &UiScope, snapshot: DialogSnapshot, callbacks: ConfirmCallbacks) -> Self {
        // The sentinel can never be on screen
        let visible = snapshot.visible && !snapshot.visuals.is_empty();
        let phase = if visible {
            ConfirmPhase::AwaitingInput
        } else {
            ConfirmPhase::Idle
        };
        let (results_tx, mut results_rx) = rendezvous::channel();
        let (visuals, _) = watch::channel(snapshot.visuals);

        let shared = Arc::new(Shared {
            base: HandleBase::new(scope, visible),
            visuals,
            phase: Mutex::new(phase),
            pending: PendingSlot::default(),
            callbacks: CallbackRegistry::new(callbacks),
            results: results_tx,
            issued: AtomicU64::new(0),
            published: Arc::new(AtomicU64::new(0)),
        });

        let consumer = {
            let shared = shared.clone();
            scope.spawn(async move {
                while let Some(answer) = results_rx.recv().await {
                    shared.deliver(answer);
                }
            })
        };

        Self { shared, consumer }
    }

    /// State to hand back to [`ConfirmDialog::restore`] after recreation.
    pub fn save(&self) -> DialogSnapshot {
        DialogSnapshot {
            visible: self.is_shown(),
            visuals: self.visuals(),
        }
    }

    /// Publish `visuals` and show. The outcome reaches registered callbacks only.
    pub fn show_confirm(&self, visuals: Visuals) {
        let request = self.shared.next_request();
        self.shared.pending.evict();
        self.shared.publish(request, visuals);
    }

    /// Publish `visuals`, show, and wait for the user's decision.
    ///
    /// There is no built-in timeout; race this against a timer if one is
    /// needed. Dropping the returned future withdraws the request, and the
    /// dialog is hidden unless callbacks are registered.
    pub async fn await_confirm(&self, visuals: Visuals) -> Result<ConfirmResult, DialogError> {
        let id = self.shared.next_request();
        let rx = self.shared.pending.register(id);
        let mut parked = Parked {
            shared: &self.shared,
            id,
            armed: true,
        };
        self.shared.publish(id, visuals);

        let scope = self.shared.base.scope();
        let outcome = tokio::select! {
            biased;
            _ = scope.cancelled() => Err(DialogError::Cancelled),
            result = rx => result.map_err(|_| DialogError::Superseded),
        };

        // Resolved or superseded: the slot is no longer ours to clean up
        if !matches!(outcome, Err(DialogError::Cancelled)) {
            parked.armed = false;
        }
        outcome
    }

    /// The visuals of the current (or last) request.
    pub fn visuals(&self) -> Visuals {
        self.shared.visuals.borrow().clone()
    }

    pub fn subscribe_visuals(&self) -> watch::Receiver<Visuals> {
        self.shared.visuals.subscribe()
    }

    pub fn phase(&self) -> ConfirmPhase {
        self.shared.phase()
    }

    /// Whether an `await_confirm` caller is parked.
    pub fn is_awaiting(&self) -> bool {
        self.shared.pending.is_pending()
    }

    /// Replace the callbacks. Applies to the next result delivered.
    pub fn set_callbacks(&self, callbacks: ConfirmCallbacks) {
        self.shared.callbacks.replace(callbacks);
    }

    pub fn responder(&self) -> ConfirmResponder {
        ConfirmResponder {
            scope: self.shared.base.scope().clone(),
            results: self.shared.results.clone(),
            published: self.shared.published.clone(),
            request: None,
        }
    }

    /// What a renderer should draw, if anything.
    ///
    /// The responder in the overlay answers only the request it shows.
    pub fn overlay(&self) -> Option<Overlay> {
        if !self.is_shown() {
            return None;
        }
        // Id first: pairing an older id with newer visuals only drops a tap
        let request = self.shared.published.load(Ordering::Acquire);
        let visuals = self.shared.visuals.borrow().clone();
        Some(Overlay::Confirm {
            visuals,
            responder: ConfirmResponder {
                request: Some(request),
                ..self.responder()
            },
        })
    }
}

impl DialogHandle for ConfirmDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::Confirm
    }

    fn is_shown(&self) -> bool {
        self.shared.base.is_shown()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.shared.base.subscribe()
    }

    /// No-op while the visuals are the empty sentinel.
    fn show(&self) {
        self.shared.show();
    }

    fn hide(&self) {
        self.shared.hide();
    }
}

impl Drop for ConfirmDialog {
    fn drop(&mut self) {
        self.consumer.abort();
    }
}

impl std::fmt::Debug for ConfirmDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmDialog")
            .field("shown", &self.is_shown())
            .field("phase", &self.phase())
            .field("visuals", &self.visuals())
            .finish()
    }
}

/// Withdraws a parked caller if its `await_confirm` ends without a result.
struct Parked<'a> {
    shared: &'a Arc<Shared>,
    id: u64,
    armed: bool,
}

impl Drop for Parked<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.shared.abandon(self.id);
        }
    }
}
