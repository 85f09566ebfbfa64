use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to create storage directory '{}': {source}", path.display())]
    CreateStorageDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create table file '{}': {source}", path.display())]
    CreateTableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open table file '{}': {source}", path.display())]
    OpenTableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid table file (magic mismatch): found {found:02x?}")]
    InvalidMagic { found: [u8; 4] },

    #[error("Unexpected end of data while reading {field}")]
    Truncated { field: &'static str },
}

impl StorageError {
    /// Maps a short read to `Truncated`, keeps every other I/O failure as is.
    pub fn from_read(err: io::Error, field: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            StorageError::Truncated { field }
        } else {
            StorageError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
