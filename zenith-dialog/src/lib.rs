//! Zenith Dialog - Modal coordination for the AZenith manager.
//!
//! Application code often wants to *block* on a user decision ("Reboot
//! now?") or keep an overlay up while some work runs, but the UI is event
//! driven and cannot block. This crate bridges the two:
//!
//! - [`UiScope`] - the single cooperative scheduler that owns UI state
//! - [`LoadingDialog`] - overlay tied to the lifetime of a unit of work
//! - [`ConfirmDialog`] - two-outcome prompt, awaitable or callback driven
//! - [`CustomDialog`] - arbitrary content that dismisses itself
//!
//! # Usage
//!
//! ```rust,ignore
//! use zenith_dialog::{ConfirmCallbacks, ConfirmDialog, UiScope};
//! use zenith_api::{ConfirmResult, Visuals};
//!
//! let scope = UiScope::new();
//! let dialog = ConfirmDialog::new(&scope, ConfirmCallbacks::new());
//!
//! // The renderer hands `dialog.responder()` to its buttons.
//! match dialog.await_confirm(Visuals::new("Reboot now?")).await? {
//!     ConfirmResult::Confirmed => reboot(),
//!     ConfirmResult::Canceled => {}
//! }
//! ```

pub mod confirm;
pub mod custom;
pub mod loading;
pub mod overlay;

mod error;
mod handle;
mod scope;
mod visibility;

pub use confirm::{ConfirmCallbacks, ConfirmDialog, ConfirmPhase, ConfirmResponder};
pub use custom::{CustomDialog, Dismiss};
pub use error::DialogError;
pub use handle::{DialogHandle, HandleBase};
pub use loading::LoadingDialog;
pub use overlay::{follow, Overlay, OverlayHost};
pub use scope::UiScope;
pub use visibility::VisibilityStore;

// Re-export the value types callers need alongside the handles
pub use zenith_api::{ConfirmResult, DialogKind, DialogSnapshot, Visuals};
