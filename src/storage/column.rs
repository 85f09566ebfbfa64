use std::{borrow::Cow, fmt, io::Read};

use serde::{Deserialize, Serialize};

use crate::{
    storage::read_u8,
    types::error::{Result, StorageError},
};

/// Type tag of a column, stored as a single byte.
///
/// Tags outside the known set are kept verbatim in `Unknown` so a file
/// written by a newer tool can still be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Int,
    Text,
    Float,
    Unknown(u8),
}

impl ColumnType {
    pub fn tag(&self) -> u8 {
        match self {
            ColumnType::Int => 1,
            ColumnType::Text => 2,
            ColumnType::Float => 3,
            ColumnType::Unknown(tag) => *tag,
        }
    }

    pub fn from_tag(tag: u8) -> Self {
        match tag {
            1 => ColumnType::Int,
            2 => ColumnType::Text,
            3 => ColumnType::Float,
            other => ColumnType::Unknown(other),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ColumnType::Unknown(_))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int => write!(f, "INT"),
            ColumnType::Text => write!(f, "TEXT"),
            ColumnType::Float => write!(f, "FLOAT"),
            ColumnType::Unknown(tag) => write!(f, "UNKNOWN({})", tag),
        }
    }
}

/// A single column definition: raw name bytes plus a type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: Vec<u8>,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<Vec<u8>>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Length recorded in the one-byte prefix. Names longer than 255 bytes
    /// wrap around, e.g. a 300 byte name records 44.
    pub fn encoded_name_len(&self) -> u8 {
        self.name.len() as u8
    }

    pub fn encoded_size(&self) -> usize {
        2 + self.encoded_name_len() as usize
    }

    /// Layout: `[len: u8][name: len bytes][type: u8]`.
    ///
    /// Only the first `len` bytes of the name are written so the next field
    /// still lines up when the name was truncated by the length prefix.
    pub fn to_bytes(&self) -> Vec<u8> {
        let name_len = self.encoded_name_len();
        let mut buffer = Vec::with_capacity(self.encoded_size());

        buffer.push(name_len);
        buffer.extend_from_slice(&self.name[..name_len as usize]);
        buffer.push(self.column_type.tag());

        buffer
    }

    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let name_len = read_u8(reader, "column name length")?;

        let mut name = vec![0u8; name_len as usize];
        reader
            .read_exact(&mut name)
            .map_err(|e| StorageError::from_read(e, "column name"))?;

        let tag = read_u8(reader, "column type")?;

        Ok(Self {
            name,
            column_type: ColumnType::from_tag(tag),
        })
    }

    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self> {
        Self::from_reader(&mut bytes)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column Name: {}, Type: {}", self.name_lossy(), self.column_type)
    }
}
