use std::{
    io::{Seek, SeekFrom, Write},
    path::PathBuf,
};

use tracing::{debug, error, info};

use crate::{
    config::StorageConfig,
    storage::{
        fs::{FileSystem, OsFileSystem},
        header::TableHeader,
        schema::Schema,
    },
    types::{
        TABLE_FILE_EXTENSION,
        error::{Result, StorageError},
    },
};

/// Creates table files and reads their header and schema back.
///
/// Every file handle lives for a single call. The manager never writes a
/// schema itself: callers open the file with `FileSystem::open_write`, seek
/// to `schema_offset()` and write the encoded schema there.
pub struct TableFileManager<F: FileSystem = OsFileSystem> {
    config: StorageConfig,
    fs: F,
    header: TableHeader,
}

impl TableFileManager<OsFileSystem> {
    pub fn on_disk(config: StorageConfig) -> Self {
        Self::new(config, OsFileSystem)
    }
}

impl<F: FileSystem> TableFileManager<F> {
    pub fn new(config: StorageConfig, fs: F) -> Self {
        Self {
            config,
            fs,
            header: TableHeader::default(),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Currently loaded header, the default one until a table is created or read.
    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    pub fn table_path(&self, table_name: &str) -> PathBuf {
        self.config
            .storage_dir
            .join(format!("{}.{}", table_name, TABLE_FILE_EXTENSION))
    }

    /// Create `<storage_dir>/<table_name>.tbl` holding a default header.
    ///
    /// An existing file with the same name is truncated.
    pub fn create_table(&mut self, table_name: &str) -> Result<()> {
        let storage_dir = &self.config.storage_dir;
        if let Err(source) = self.fs.create_dir_all(storage_dir) {
            error!(path = %storage_dir.display(), error = %source, "storage directory creation failed");
            return Err(StorageError::CreateStorageDir {
                path: storage_dir.clone(),
                source,
            });
        }
        info!(path = %storage_dir.display(), "storage directory ready");

        let path = self.table_path(table_name);
        let mut file = match self.fs.create(&path) {
            Ok(file) => file,
            Err(source) => {
                error!(table = table_name, path = %path.display(), error = %source, "table file creation failed");
                return Err(StorageError::CreateTableFile { path, source });
            }
        };

        let header = TableHeader::default();
        header.write_to(&mut file)?;
        file.flush()?;

        info!(table = table_name, path = %path.display(), "table created");
        self.header = header;
        Ok(())
    }

    /// Decode the header of an existing table and keep it as the loaded header.
    pub fn read_header(&mut self, table_name: &str) -> Result<TableHeader> {
        let path = self.table_path(table_name);
        let mut file = self
            .fs
            .open_read(&path)
            .map_err(|source| StorageError::OpenTableFile {
                path: path.clone(),
                source,
            })?;

        let header = TableHeader::from_reader(&mut file).inspect_err(|e| {
            error!(table = table_name, path = %path.display(), error = %e, "header decode failed");
        })?;

        debug!(table = table_name, schema_offset = header.schema_offset, "header loaded");
        self.header = header.clone();
        Ok(header)
    }

    pub fn schema_offset(&self) -> u32 {
        self.header.schema_offset
    }

    /// Decode the schema stored at the table's own schema offset.
    ///
    /// Does not touch the loaded header.
    pub fn read_schema(&self, table_name: &str) -> Result<Schema> {
        let path = self.table_path(table_name);
        let mut file = self
            .fs
            .open_read(&path)
            .map_err(|source| StorageError::OpenTableFile {
                path: path.clone(),
                source,
            })?;

        let header = TableHeader::from_reader(&mut file)?;
        file.seek(SeekFrom::Start(header.schema_offset as u64))?;
        debug!(table = table_name, schema_offset = header.schema_offset, "reading schema");

        Schema::from_reader(&mut file)
    }
}
