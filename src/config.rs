use std::{env, path::PathBuf};

use crate::types::DEFAULT_STORAGE_DIR;

pub const STORAGE_DIR_ENV: &str = "MYTB_STORAGE_DIR";

/// Where table files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub storage_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

impl StorageConfig {
    /// Default config, with the storage directory taken from `MYTB_STORAGE_DIR` when set.
    pub fn from_env() -> Self {
        match env::var_os(STORAGE_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::default().with_storage_dir(dir),
            _ => Self::default(),
        }
    }

    pub fn with_storage_dir(mut self, storage_dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = storage_dir.into();
        self
    }
}
