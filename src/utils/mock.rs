use std::path::{Path, PathBuf};

use tempfile::{Builder, TempDir};

use crate::{
    config::StorageConfig,
    storage::{fs::MemoryFileSystem, table::TableFileManager},
};

/// Temporary storage directory on disk, removed on drop.
pub struct TempStorage {
    pub dir: TempDir,
}

impl TempStorage {
    pub fn new() -> std::io::Result<Self> {
        Self::with_prefix("mytb_test")
    }

    pub fn with_prefix(prefix: &str) -> std::io::Result<Self> {
        let dir = Builder::new().prefix(prefix).tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Storage directory inside the temp dir, not created yet.
    pub fn storage_dir(&self) -> PathBuf {
        self.dir.path().join("customdatabase")
    }

    pub fn config(&self) -> StorageConfig {
        StorageConfig::default().with_storage_dir(self.storage_dir())
    }

    pub fn manager(&self) -> TableFileManager {
        TableFileManager::on_disk(self.config())
    }
}

/// Manager over a fresh in-memory filesystem, plus a handle onto that filesystem.
pub fn memory_manager() -> (TableFileManager<MemoryFileSystem>, MemoryFileSystem) {
    let fs = MemoryFileSystem::new();
    let manager = TableFileManager::new(StorageConfig::default(), fs.clone());
    (manager, fs)
}
