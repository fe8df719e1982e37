//! Dialog outcomes and saved dialog state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Visuals;

/// Outcome of a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmResult {
    /// The user activated the confirm button.
    Confirmed,
    /// The user activated dismiss, or the dialog was closed some other way.
    Canceled,
}

impl ConfirmResult {
    pub fn is_confirmed(self) -> bool {
        matches!(self, ConfirmResult::Confirmed)
    }
}

/// Which coordinator variant a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogKind {
    Loading,
    Confirm,
    Custom,
}

impl DialogKind {
    pub fn name(self) -> &'static str {
        match self {
            DialogKind::Loading => "LoadingDialog",
            DialogKind::Confirm => "ConfirmDialog",
            DialogKind::Custom => "CustomDialog",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State a host keeps across a UI teardown/recreate cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DialogSnapshot {
    pub visible: bool,
    pub visuals: Visuals,
}
