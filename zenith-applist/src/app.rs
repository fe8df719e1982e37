//! App entries.

use serde::{Deserialize, Serialize};

/// Label used when a package doesn't report one.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A package as reported by the package scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledPackage {
    pub package_name: String,
    pub label: Option<String>,
    pub uid: u32,
    pub is_system: bool,
}

impl InstalledPackage {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            label: None,
            uid: 0,
            is_system: false,
        }
    }
}

/// One row of the app list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub label: String,
    pub package_name: String,
    pub uid: u32,
    pub is_system: bool,
    /// Listed in the bundled game list.
    pub is_recommended: bool,
    /// Present in the daemon's applist config.
    pub is_enabled_in_config: bool,
}

impl AppInfo {
    pub fn from_package(package: InstalledPackage, is_recommended: bool, is_enabled: bool) -> Self {
        Self {
            label: package.label.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            package_name: package.package_name,
            uid: package.uid,
            is_system: package.is_system,
            is_recommended,
            is_enabled_in_config: is_enabled,
        }
    }

    /// Case-insensitive match on label or package name.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.label.to_lowercase().contains(query_lower)
            || self.package_name.to_lowercase().contains(query_lower)
    }
}
