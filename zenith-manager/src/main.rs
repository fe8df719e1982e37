//! AZenith manager - terminal host.
//!
//! Runs the manager's dialog flows without a GUI: overlays are drawn on the
//! terminal and confirmations are answered from stdin.

mod cli;
mod commands;
mod logging;
mod terminal;

use anyhow::Result;
use clap::Parser;
use zenith_dialog::UiScope;

use crate::cli::{Args, Command};
use crate::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let scope = UiScope::new();

    // Ctrl-C tears the UI scope down, which cancels any pending prompt
    {
        let scope = scope.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, closing dialogs");
                scope.cancel();
            }
        });
    }

    let code = match args.command {
        Command::Apps(opts) => commands::apps(&scope, opts).await?,
        Command::Confirm(opts) => commands::confirm(&scope, opts).await?,
    };

    scope.cancel();
    std::process::exit(code);
}
