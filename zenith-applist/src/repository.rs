//! The app list and its lifecycle.

use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use tokio::sync::watch;

use crate::app::{AppInfo, InstalledPackage};
use crate::config::{enabled_packages, recommended_packages, ApplistConfig};
use crate::source::PackageSource;

/// Search and visibility options for [`AppRepository::filtered`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppFilter {
    pub query: String,
    pub show_system: bool,
}

impl AppFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            show_system: false,
        }
    }

    pub fn with_system(mut self, show_system: bool) -> Self {
        self.show_system = show_system;
        self
    }
}

/// Owns the installed-app list.
///
/// Construct once per manager session, `load` it, and `teardown` when the
/// session ends. Readers get snapshots; the list is never handed out by
/// reference.
pub struct AppRepository {
    config: ApplistConfig,
    apps: Mutex<Vec<AppInfo>>,
    refreshing: watch::Sender<bool>,
}

impl AppRepository {
    pub fn new(config: ApplistConfig) -> Self {
        let (refreshing, _) = watch::channel(false);
        Self {
            config,
            apps: Mutex::new(Vec::new()),
            refreshing,
        }
    }

    pub fn config(&self) -> &ApplistConfig {
        &self.config
    }

    /// Scan installed packages and rebuild the list.
    ///
    /// Does nothing if the list is already populated, unless `force` is set.
    /// Returns the number of apps in the list afterwards.
    pub async fn load(&self, source: &dyn PackageSource, force: bool) -> Result<usize> {
        if !force && !self.is_empty() {
            tracing::debug!("App list already loaded, skipping scan");
            return Ok(self.len());
        }

        let _refreshing = RefreshingGuard::start(&self.refreshing);

        let recommended = recommended_packages(&self.config.gamelist_path).await;
        let enabled = enabled_packages(&self.config.applist_path).await;
        let installed = source.installed().await?;

        let loaded: Vec<AppInfo> = installed
            .into_iter()
            .map(|package: InstalledPackage| {
                let is_recommended = recommended.contains(&package.package_name);
                let is_enabled = enabled.contains(&package.package_name);
                AppInfo::from_package(package, is_recommended, is_enabled)
            })
            .collect();

        let count = loaded.len();
        *self.lock() = loaded;
        tracing::info!(count, enabled = enabled.len(), "Loaded app list");
        Ok(count)
    }

    /// Re-read the applist config and update enablement flags in place.
    pub async fn refresh_config_status(&self) {
        let enabled = enabled_packages(&self.config.applist_path).await;
        let mut apps = self.lock();
        for app in apps.iter_mut() {
            app.is_enabled_in_config = enabled.contains(&app.package_name);
        }
        tracing::debug!(enabled = enabled.len(), "Refreshed applist config status");
    }

    /// Drop the list. The repository can be loaded again afterwards.
    pub fn teardown(&self) {
        self.lock().clear();
        self.refreshing.send_replace(false);
    }

    /// Snapshot of the list in scan order.
    pub fn apps(&self) -> Vec<AppInfo> {
        self.lock().clone()
    }

    pub fn find(&self, package_name: &str) -> Option<AppInfo> {
        self.lock()
            .iter()
            .find(|app| app.package_name == package_name)
            .cloned()
    }

    /// Apps matching `filter`, enabled first, then recommended, then by label.
    pub fn filtered(&self, filter: &AppFilter) -> Vec<AppInfo> {
        let query = filter.query.to_lowercase();
        let mut apps: Vec<AppInfo> = self
            .lock()
            .iter()
            .filter(|app| app.matches(&query))
            .filter(|app| filter.show_system || !app.is_system)
            .cloned()
            .collect();
        apps.sort_by(display_order);
        apps
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn is_refreshing(&self) -> bool {
        *self.refreshing.borrow()
    }

    pub fn subscribe_refreshing(&self) -> watch::Receiver<bool> {
        self.refreshing.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AppInfo>> {
        self.apps.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn display_order(a: &AppInfo, b: &AppInfo) -> Ordering {
    b.is_enabled_in_config
        .cmp(&a.is_enabled_in_config)
        .then_with(|| b.is_recommended.cmp(&a.is_recommended))
        .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        .then_with(|| a.package_name.cmp(&b.package_name))
}

/// Holds the refreshing flag up for the duration of a scan.
struct RefreshingGuard<'a> {
    flag: &'a watch::Sender<bool>,
}

impl<'a> RefreshingGuard<'a> {
    fn start(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self { flag }
    }
}

impl Drop for RefreshingGuard<'_> {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}
