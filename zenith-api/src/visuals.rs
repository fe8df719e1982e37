//! Display payload for a pending confirmation request.

use serde::{Deserialize, Serialize};

/// Label shown on the confirm button when the request doesn't name one.
pub const DEFAULT_CONFIRM_LABEL: &str = "OK";

/// Label shown on the dismiss button when the request doesn't name one.
pub const DEFAULT_DISMISS_LABEL: &str = "Cancel";

/// What a confirmation dialog shows.
///
/// A published `Visuals` is never edited in place; a new request replaces it
/// as a whole. The [`Visuals::empty`] value is the sentinel meaning "nothing
/// is pending" and a confirm dialog refuses to show while it holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visuals {
    pub title: String,
    pub content: Option<String>,
    pub confirm: Option<String>,
    pub dismiss: Option<String>,
}

impl Visuals {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: None,
            confirm: None,
            dismiss: None,
        }
    }

    /// The "no confirmation pending" sentinel.
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            content: Some(String::new()),
            confirm: None,
            dismiss: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_confirm(mut self, label: impl Into<String>) -> Self {
        self.confirm = Some(label.into());
        self
    }

    pub fn with_dismiss(mut self, label: impl Into<String>) -> Self {
        self.dismiss = Some(label.into());
        self
    }

    /// Text for the confirm button, falling back to [`DEFAULT_CONFIRM_LABEL`].
    pub fn confirm_text(&self) -> &str {
        self.confirm.as_deref().unwrap_or(DEFAULT_CONFIRM_LABEL)
    }

    /// Text for the dismiss button, falling back to [`DEFAULT_DISMISS_LABEL`].
    pub fn dismiss_text(&self) -> &str {
        self.dismiss.as_deref().unwrap_or(DEFAULT_DISMISS_LABEL)
    }
}

impl Default for Visuals {
    fn default() -> Self {
        Self::empty()
    }
}
