//! Fire-and-forget hooks run when a confirmation resolves.

use std::fmt;
use std::sync::{Arc, RwLock};

use zenith_api::ConfirmResult;

pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Optional hooks for each outcome.
#[derive(Clone, Default)]
pub struct ConfirmCallbacks {
    pub on_confirm: Option<Callback>,
    pub on_dismiss: Option<Callback>,
}

impl ConfirmCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_confirm(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_confirm = Some(Arc::new(f));
        self
    }

    pub fn on_dismiss(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_dismiss = Some(Arc::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.on_confirm.is_none() && self.on_dismiss.is_none()
    }

    fn for_result(&self, result: ConfirmResult) -> Option<&Callback> {
        match result {
            ConfirmResult::Confirmed => self.on_confirm.as_ref(),
            ConfirmResult::Canceled => self.on_dismiss.as_ref(),
        }
    }
}

impl fmt::Debug for ConfirmCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmCallbacks")
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish()
    }
}

/// The currently registered hooks. Replacing them takes effect for the
/// next result delivered.
#[derive(Debug, Default)]
pub(crate) struct CallbackRegistry {
    inner: RwLock<ConfirmCallbacks>,
}

impl CallbackRegistry {
    pub fn new(callbacks: ConfirmCallbacks) -> Self {
        Self {
            inner: RwLock::new(callbacks),
        }
    }

    pub fn replace(&self, callbacks: ConfirmCallbacks) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = callbacks;
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).is_empty()
    }

    /// Invoke the hook matching `result`, if any. Returns whether one ran.
    pub fn fire(&self, result: ConfirmResult) -> bool {
        // Clone out so the hook runs without the lock held
        let hook = self
            .inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .for_result(result)
            .cloned();
        match hook {
            Some(hook) => {
                hook();
                true
            }
            None => false,
        }
    }
}
