//! Subcommand bodies.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use zenith_applist::{AppInfo, AppRepository, FilePackageSource};
use zenith_dialog::{
    follow, ConfirmCallbacks, ConfirmDialog, ConfirmResult, DialogError, DialogHandle,
    LoadingDialog, Overlay, UiScope, Visuals,
};

use crate::cli::{AppsArgs, ConfirmArgs};
use crate::terminal::TerminalHost;

/// Exit status when the prompt was interrupted.
const EXIT_INTERRUPTED: i32 = 130;

/// Scan packages under a loading overlay and print the filtered list.
pub async fn apps(scope: &UiScope, opts: AppsArgs) -> Result<i32> {
    let loading = LoadingDialog::new(scope);
    render_on_terminal(scope, loading.subscribe(), None, {
        let loading = loading.clone();
        move || loading.overlay()
    });

    let repo = AppRepository::new(opts.config());
    let source = FilePackageSource::new(&opts.packages);
    let count = loading.with_loading(repo.load(&source, true)).await?;
    tracing::info!(count, "Scanned packages");

    for app in repo.filtered(&opts.filter()) {
        println!("{}", format_row(&app));
    }

    repo.teardown();
    Ok(0)
}

/// Prompt on the terminal and map the answer to an exit status.
pub async fn confirm(scope: &UiScope, opts: ConfirmArgs) -> Result<i32> {
    let dialog = Arc::new(ConfirmDialog::new(scope, ConfirmCallbacks::new()));
    render_on_terminal(scope, dialog.subscribe(), Some(dialog.subscribe_visuals()), {
        let dialog = dialog.clone();
        move || dialog.overlay()
    });

    match dialog.await_confirm(opts.visuals()).await {
        Ok(ConfirmResult::Confirmed) => Ok(0),
        Ok(ConfirmResult::Canceled) => Ok(1),
        Err(DialogError::Cancelled) => Ok(EXIT_INTERRUPTED),
        Err(e) => Err(e.into()),
    }
}

fn render_on_terminal<F>(
    scope: &UiScope,
    visible: watch::Receiver<bool>,
    visuals: Option<watch::Receiver<Visuals>>,
    overlay: F,
) where
    F: Fn() -> Option<Overlay> + Send + 'static,
{
    scope.spawn(async move {
        let mut host = TerminalHost::default();
        follow(visible, visuals, &mut host, overlay).await;
    });
}

fn format_row(app: &AppInfo) -> String {
    let mut flags = Vec::new();
    if app.is_enabled_in_config {
        flags.push("enabled");
    }
    if app.is_recommended {
        flags.push("recommended");
    }
    if app.is_system {
        flags.push("system");
    }
    format!("{:<32} {:<48} {}", app.label, app.package_name, flags.join(","))
}
