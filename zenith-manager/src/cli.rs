use std::path::PathBuf;

use clap::{Parser, Subcommand};
use zenith_api::Visuals;
use zenith_applist::{
    AppFilter, ApplistConfig, DEFAULT_APPLIST_PATH, DEFAULT_GAMELIST_PATH,
};

#[derive(Debug, Parser)]
#[command(name = "zenith-manager", version, about = "AZenith manager terminal host")]
pub struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List installed apps with their game-list status
    Apps(AppsArgs),
    /// Ask a yes/no question; exits 0 if confirmed, 1 if canceled
    Confirm(ConfirmArgs),
}

#[derive(Debug, clap::Args)]
pub struct AppsArgs {
    /// Package list to scan (`package[:label[:system]]` per line)
    #[arg(long)]
    pub packages: PathBuf,

    /// Daemon applist config
    #[arg(long, default_value = DEFAULT_APPLIST_PATH)]
    pub applist: PathBuf,

    /// Recommended game list
    #[arg(long, default_value = DEFAULT_GAMELIST_PATH)]
    pub gamelist: PathBuf,

    /// Only show apps whose label or package contains this
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Include system apps
    #[arg(long)]
    pub system: bool,
}

impl AppsArgs {
    pub fn config(&self) -> ApplistConfig {
        ApplistConfig {
            applist_path: self.applist.clone(),
            gamelist_path: self.gamelist.clone(),
        }
    }

    pub fn filter(&self) -> AppFilter {
        AppFilter::new(self.query.clone()).with_system(self.system)
    }
}

#[derive(Debug, clap::Args)]
pub struct ConfirmArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: Option<String>,

    /// Confirm button label
    #[arg(long)]
    pub confirm: Option<String>,

    /// Dismiss button label
    #[arg(long)]
    pub dismiss: Option<String>,
}

impl ConfirmArgs {
    pub fn visuals(&self) -> Visuals {
        Visuals {
            title: self.title.clone(),
            content: self.content.clone(),
            confirm: self.confirm.clone(),
            dismiss: self.dismiss.clone(),
        }
    }
}
