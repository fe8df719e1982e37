//! Zenith Applist - The installed-app list shown on the game list screen.
//!
//! An [`AppRepository`] owns the list for its whole lifetime:
//! - `load` scans installed packages through a [`PackageSource`]
//! - `refresh_config_status` re-reads which packages the daemon has enabled
//! - `filtered` produces the search/sort view the screen renders
//! - `teardown` drops everything

mod app;
mod config;
mod repository;
mod source;

pub use app::{AppInfo, InstalledPackage};
pub use config::{
    enabled_packages, recommended_packages, ApplistConfig, DEFAULT_APPLIST_PATH,
    DEFAULT_GAMELIST_PATH,
};
pub use repository::{AppFilter, AppRepository};
pub use source::{FilePackageSource, PackageSource};
