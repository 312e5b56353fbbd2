//! Local storage location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the key-value store inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Data directory. Empty means the platform data dir (`~/.local/share/lather`, ...).
    #[serde(default)]
    pub data_dir: String,
}

impl StorageConfig {
    /// Resolve the data directory, falling back to `./.lather` when the
    /// platform has no data dir.
    pub fn resolved_data_dir(&self) -> PathBuf {
        if !self.data_dir.is_empty() {
            return PathBuf::from(&self.data_dir);
        }
        dirs::data_dir().map_or_else(|| PathBuf::from(".lather"), |p| p.join("lather"))
    }

    /// Path of the key-value store file.
    pub fn store_path(&self) -> PathBuf {
        self.resolved_data_dir().join(STORE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_wins() {
        let config = StorageConfig {
            data_dir: "/tmp/lather-test".into(),
        };
        assert_eq!(
            config.store_path(),
            PathBuf::from("/tmp/lather-test").join(STORE_FILE_NAME)
        );
    }

    #[test]
    fn default_data_dir_ends_in_lather() {
        let dir = StorageConfig::default().resolved_data_dir();
        assert!(dir.ends_with("lather") || dir.ends_with(".lather"));
    }
}
