//! Dialog with arbitrary content that handles its own outcome.

use tokio::sync::watch;
use zenith_api::DialogKind;

use crate::handle::{DialogHandle, HandleBase};
use crate::scope::UiScope;

#[derive(Debug, Clone)]
pub struct CustomDialog {
    base: HandleBase,
}

impl CustomDialog {
    pub fn new(scope: &UiScope) -> Self {
        Self::restore(scope, false)
    }

    /// Recreate a dialog whose visibility was saved with [`CustomDialog::save`].
    pub fn restore(scope: &UiScope, visible: bool) -> Self {
        Self {
            base: HandleBase::new(scope, visible),
        }
    }

    pub fn save(&self) -> bool {
        self.base.is_shown()
    }

    /// Run `content` if the dialog is shown, giving it a way to close itself.
    pub fn render<V>(&self, content: impl FnOnce(Dismiss) -> V) -> Option<V> {
        self.base.is_shown().then(|| content(self.dismisser()))
    }

    pub fn dismisser(&self) -> Dismiss {
        Dismiss {
            base: self.base.clone(),
        }
    }
}

impl DialogHandle for CustomDialog {
    fn kind(&self) -> DialogKind {
        DialogKind::Custom
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

/// Capability handed to custom content for closing its dialog.
#[derive(Debug, Clone)]
pub struct Dismiss {
    base: HandleBase,
}

impl Dismiss {
    pub fn dismiss(&self) {
        self.base.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_only_while_shown() {
        let scope = UiScope::new();
        let dialog = CustomDialog::new(&scope);
        assert!(dialog.render(|_| "color palette").is_none());

        dialog.show();
        scope.flush().await;
        assert_eq!(dialog.render(|_| "color palette"), Some("color palette"));
    }

    #[tokio::test]
    async fn test_content_dismisses_itself() {
        let scope = UiScope::new();
        let dialog = CustomDialog::restore(&scope, true);

        let dismiss = dialog.render(|dismiss| dismiss).unwrap();
        dismiss.dismiss();
        scope.flush().await;

        assert!(!dialog.is_shown());
        assert!(!dialog.save());
        assert_eq!(dialog.kind().name(), "CustomDialog");
    }
}
