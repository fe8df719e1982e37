//! Where installed packages come from.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::app::InstalledPackage;

/// Package scanner. The platform package manager on device; a file in tests
/// and on the host.
#[async_trait::async_trait]
pub trait PackageSource: Send + Sync {
    async fn installed(&self) -> Result<Vec<InstalledPackage>>;
}

/// Reads packages from a text file, one per line:
///
/// ```text
/// package[:label[:system]]
/// ```
///
/// e.g. `com.android.settings:Settings:system`.
#[derive(Debug, Clone)]
pub struct FilePackageSource {
    path: PathBuf,
}

impl FilePackageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl PackageSource for FilePackageSource {
    async fn installed(&self) -> Result<Vec<InstalledPackage>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read package list: {:?}", self.path))?;
        Ok(content.lines().filter_map(parse_line).collect())
    }
}

fn parse_line(line: &str) -> Option<InstalledPackage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let mut fields = line.splitn(3, ':');
    let package_name = fields.next()?.trim();
    if package_name.is_empty() {
        return None;
    }
    let label = fields
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);
    let is_system = fields.next().is_some_and(|flag| flag.trim() == "system");

    Some(InstalledPackage {
        package_name: package_name.to_string(),
        label,
        uid: 0,
        is_system,
    })
}
