//! Daemon-side files the app list reads.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Per-game settings written by the daemon, keyed by package name.
pub const DEFAULT_APPLIST_PATH: &str = "/data/adb/.config/AZenith/gamelist/azenithApplist.json";

/// Packages recommended for the game list, one per line. Ships with the manager.
pub const DEFAULT_GAMELIST_PATH: &str = "gamelist.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplistConfig {
    pub applist_path: PathBuf,
    pub gamelist_path: PathBuf,
}

impl Default for ApplistConfig {
    fn default() -> Self {
        Self {
            applist_path: PathBuf::from(DEFAULT_APPLIST_PATH),
            gamelist_path: PathBuf::from(DEFAULT_GAMELIST_PATH),
        }
    }
}

/// Packages enabled in the daemon's applist config.
///
/// A missing or blank file means nothing is enabled. An unreadable or
/// malformed file is logged and treated the same way.
pub async fn enabled_packages(path: &Path) -> HashSet<String> {
    match read_enabled(path).await {
        Ok(set) => set,
        Err(e) => {
            tracing::warn!("Failed to read applist config: {:#}", e);
            HashSet::new()
        }
    }
}

async fn read_enabled(path: &Path) -> Result<HashSet<String>> {
    let Some(content) = read_optional(path).await? else {
        return Ok(HashSet::new());
    };
    if content.trim().is_empty() {
        return Ok(HashSet::new());
    }
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid applist JSON: {:?}", path))?;
    Ok(map.into_iter().map(|(package, _)| package).collect())
}

/// Packages listed in the game list.
///
/// A missing file is an empty list. An unreadable one is logged and treated
/// the same way.
pub async fn recommended_packages(path: &Path) -> HashSet<String> {
    match read_recommended(path).await {
        Ok(set) => set,
        Err(e) => {
            tracing::warn!("Failed to read game list: {:#}", e);
            HashSet::new()
        }
    }
}

async fn read_recommended(path: &Path) -> Result<HashSet<String>> {
    let Some(content) = read_optional(path).await? else {
        tracing::debug!("No game list at {:?}", path);
        return Ok(HashSet::new());
    };
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enabled_packages_are_object_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("azenithApplist.json");
        std::fs::write(
            &path,
            r#"{"com.mobile.legends": {"perf_lite_mode": "default"}, "com.tencent.ig": {}}"#,
        )
        .unwrap();

        let enabled = enabled_packages(&path).await;
        assert_eq!(enabled.len(), 2);
        assert!(enabled.contains("com.tencent.ig"));
    }

    #[tokio::test]
    async fn test_missing_blank_and_malformed_config_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(enabled_packages(&dir.path().join("absent.json")).await.is_empty());

        let blank = dir.path().join("blank.json");
        std::fs::write(&blank, "  \n").unwrap();
        assert!(enabled_packages(&blank).await.is_empty());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{not json").unwrap();
        assert!(enabled_packages(&broken).await.is_empty());
    }

    #[tokio::test]
    async fn test_gamelist_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gamelist.txt");
        std::fs::write(&path, "com.miHoYo.GenshinImpact\n\n  com.garena.game.codm  \n").unwrap();

        let games = recommended_packages(&path).await;
        assert_eq!(games.len(), 2);
        assert!(games.contains("com.garena.game.codm"));

        let missing = recommended_packages(&dir.path().join("none.txt")).await;
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_gamelist_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        // A directory can't be read as text
        assert!(recommended_packages(dir.path()).await.is_empty());

        let binary = dir.path().join("gamelist.txt");
        std::fs::write(&binary, [0xff, 0xfe, 0x00]).unwrap();
        assert!(recommended_packages(&binary).await.is_empty());
    }
}
