//! The cooperative scheduler that owns UI state.
//!
//! A scope runs one dispatcher task that executes submitted jobs strictly in
//! submission order, one at a time. Every mutation of dialog state goes
//! through it, so observers see transitions in the order callers issued
//! them. Jobs must never wait on other jobs of the same scope.
//!
//! Cancelling the scope stops the dispatcher and every task started with
//! [`UiScope::spawn`].

use std::future::Future;
use std::pin::Pin;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Handle to a UI scope. Cheap to clone; all clones share one dispatcher.
#[derive(Clone)]
pub struct UiScope {
    jobs: mpsc::UnboundedSender<Job>,
    token: CancellationToken,
}

impl UiScope {
    /// Create a scope and start its dispatcher.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Create a scope that is cancelled together with this one.
    pub fn child(&self) -> Self {
        Self::with_token(self.token.child_token())
    }

    fn with_token(token: CancellationToken) -> Self {
        let (jobs, rx) = mpsc::unbounded_channel();
        tokio::spawn(dispatch_loop(rx, token.clone()));
        Self { jobs, token }
    }

    /// Queue a job on the dispatcher. Returns immediately.
    pub fn launch<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.jobs.send(Box::pin(job)).is_err() {
            tracing::debug!("ui scope closed, dropping job");
        }
    }

    /// Start a task that lives until it finishes or the scope is cancelled.
    pub fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = task => {}
            }
        })
    }

    /// Wait until every job queued before this call has run.
    ///
    /// Returns early if the scope is cancelled.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        self.launch(async move {
            let _ = tx.send(());
        });
        let _ = rx.await;
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the scope is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Default for UiScope {
    /// Same as [`UiScope::new`]; needs a tokio runtime.
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UiScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiScope")
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}

async fn dispatch_loop(mut rx: mpsc::UnboundedReceiver<Job>, token: CancellationToken) {
    loop {
        let job = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            job = rx.recv() => match job {
                Some(job) => job,
                None => break,
            },
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = job => {}
        }
    }
    tracing::debug!("ui scope dispatcher stopped");
}
