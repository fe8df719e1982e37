//! What the renderer draws, and a driver that keeps it in sync.

use tokio::sync::watch;
use zenith_api::Visuals;

use crate::confirm::ConfirmResponder;

/// A modal overlay ready to draw.
#[derive(Debug, Clone)]
pub enum Overlay {
    /// Non-dismissible progress indicator.
    Loading,
    /// Prompt with confirm and dismiss buttons wired to `responder`.
    Confirm {
        visuals: Visuals,
        responder: ConfirmResponder,
    },
}

/// The host UI's side of the contract.
pub trait OverlayHost {
    fn present(&mut self, overlay: Overlay);

    fn clear(&mut self);
}

/// Keep `host` in sync with a dialog.
///
/// Draws the current state right away, then again on every visibility
/// transition. With `visuals` set, a replaced prompt is redrawn while the
/// dialog stays shown. `overlay` is usually `|| dialog.overlay()`. Returns
/// once the dialog's store is gone.
pub async fn follow<H, F>(
    mut visible: watch::Receiver<bool>,
    mut visuals: Option<watch::Receiver<Visuals>>,
    host: &mut H,
    overlay: F,
) where
    H: OverlayHost,
    F: Fn() -> Option<Overlay>,
{
    let mut shown = *visible.borrow_and_update();
    draw(host, &overlay, shown);
    loop {
        let wake = tokio::select! {
            changed = visible.changed() => Wake::Visibility(changed.is_ok()),
            changed = visuals_changed(&mut visuals) => Wake::Visuals(changed),
        };
        match wake {
            Wake::Visibility(false) => break,
            Wake::Visibility(true) => {
                shown = *visible.borrow();
                draw(host, &overlay, shown);
            }
            Wake::Visuals(true) if shown => draw(host, &overlay, shown),
            Wake::Visuals(true) => {}
            Wake::Visuals(false) => visuals = None,
        }
    }
}

enum Wake {
    Visibility(bool),
    Visuals(bool),
}

fn draw<H, F>(host: &mut H, overlay: &F, shown: bool)
where
    H: OverlayHost,
    F: Fn() -> Option<Overlay>,
{
    match overlay().filter(|_| shown) {
        Some(current) => host.present(current),
        None => host.clear(),
    }
}

/// Never resolves without a receiver.
async fn visuals_changed(visuals: &mut Option<watch::Receiver<Visuals>>) -> bool {
    match visuals {
        Some(rx) => rx.changed().await.is_ok(),
        None => std::future::pending().await,
    }
}
