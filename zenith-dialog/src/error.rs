//! Dialog error types.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DialogError {
    /// The scope owning the dialog was cancelled while the caller waited.
    #[error("dialog scope cancelled")]
    Cancelled,

    /// A newer confirmation request replaced this one before it resolved.
    #[error("confirmation superseded by a newer request")]
    Superseded,
}
