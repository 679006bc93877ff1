//! Storage configuration.

use std::path::PathBuf;

/// Used when nothing else is configured.
pub const DEFAULT_STORAGE_PATH: &str = "file.json";

/// Environment variable overriding the storage file path.
pub const STORAGE_PATH_ENV: &str = "HBNB_STORAGE_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// JSON file the storage engine flushes to and reloads from.
    pub path: PathBuf,
}

impl StorageConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read `HBNB_STORAGE_PATH`, falling back to `file.json`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(STORAGE_PATH_ENV) {
            Some(path) if !path.trim().is_empty() => Self::new(path),
            _ => {
                tracing::debug!(
                    "{STORAGE_PATH_ENV} not set; using {DEFAULT_STORAGE_PATH}"
                );
                Self::default()
            }
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_PATH)
    }
}
