//! Host configuration loaded from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::auth::ADMIN_PERMISSION;

const DEFAULT_DATABASE: &str = "warps.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Settings for the process hosting the warp commands.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarpConfig {
    /// Path to the SQLite database holding the `warps` table.
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// How long a writer waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Create the database on first use when it does not exist yet.
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
    /// Permission node gating `new`, `remove` and `edit`.
    #[serde(default = "default_admin_permission")]
    pub admin_permission: String,
    /// Worlds the console host reports as loaded.
    #[serde(default = "default_worlds")]
    pub worlds: Vec<String>,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            busy_timeout_ms: default_busy_timeout_ms(),
            create_if_missing: default_true(),
            admin_permission: default_admin_permission(),
            worlds: default_worlds(),
        }
    }
}

impl WarpConfig {
    /// Read a configuration file, falling back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::from_json(&text)
                    .with_context(|| format!("invalid config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Storage subset handed to [`crate::store::WarpStore`].
    pub fn store(&self) -> StoreConfig {
        StoreConfig {
            path: self.database.clone(),
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
            create_if_missing: self.create_if_missing,
        }
    }
}

/// Where and how to open the warp database.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
    pub create_if_missing: bool,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
            create_if_missing: true,
        }
    }
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}

fn default_admin_permission() -> String {
    ADMIN_PERMISSION.to_string()
}

fn default_worlds() -> Vec<String> {
    ["world", "world_nether", "world_the_end"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() -> Result<()> {
        let config = WarpConfig::from_json("{}")?;
        assert_eq!(config.database, PathBuf::from("warps.db"));
        assert_eq!(config.busy_timeout_ms, 5_000);
        assert!(config.create_if_missing);
        assert_eq!(config.admin_permission, "warp.admin");
        assert_eq!(config.worlds.len(), 3);
        Ok(())
    }

    #[test]
    fn overrides_are_applied() -> Result<()> {
        let config = WarpConfig::from_json(
            r#"{"database": "data/w.db", "busy_timeout_ms": 250, "worlds": ["hub"]}"#,
        )?;
        let store = config.store();
        assert_eq!(store.path, PathBuf::from("data/w.db"));
        assert_eq!(store.busy_timeout, Duration::from_millis(250));
        assert_eq!(config.worlds, vec!["hub".to_string()]);
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(WarpConfig::from_json(r#"{"databse": "typo.db"}"#).is_err());
    }

    #[test]
    fn load_reads_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("warp.json");
        fs::write(&path, r#"{"admin_permission": "ops"}"#)?;
        let config = WarpConfig::load(Some(&path))?;
        assert_eq!(config.admin_permission, "ops");
        assert!(WarpConfig::load(Some(&dir.path().join("missing.json"))).is_err());
        Ok(())
    }
}
