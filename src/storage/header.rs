use std::{
    fmt,
    io::{Read, Write},
};

use serde::{Deserialize, Serialize};

use crate::{
    storage::{read_u32, read_u8},
    types::{
        FORMAT_VERSION, HEADER_FIELDS_SIZE, HEADER_PADDING_SIZE, HEADER_SIZE, PAGE_SIZE,
        TABLE_MAGIC,
        error::{Result, StorageError},
    },
};

/// First page of every table file.
///
/// The encoded form is always `HEADER_SIZE` bytes. The padding is a fixed
/// constant and does not follow `page_size`, which is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableHeader {
    pub magic: [u8; 4],
    pub version: u8,
    pub page_size: u32,
    pub num_records: u32,
    pub schema_offset: u32,
}

impl Default for TableHeader {
    fn default() -> Self {
        Self {
            magic: *TABLE_MAGIC,
            version: FORMAT_VERSION,
            page_size: PAGE_SIZE,
            num_records: 0,
            schema_offset: PAGE_SIZE,
        }
    }
}

impl TableHeader {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(HEADER_SIZE);

        buffer.extend_from_slice(&self.magic);
        buffer.push(self.version);
        buffer.extend_from_slice(&self.page_size.to_le_bytes());
        buffer.extend_from_slice(&self.num_records.to_le_bytes());
        buffer.extend_from_slice(&self.schema_offset.to_le_bytes());
        debug_assert_eq!(buffer.len(), HEADER_FIELDS_SIZE);

        buffer.resize(HEADER_FIELDS_SIZE + HEADER_PADDING_SIZE, 0);
        buffer
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Reads the 17 field bytes and leaves the padding unread.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader
            .read_exact(&mut magic)
            .map_err(|e| StorageError::from_read(e, "header magic"))?;
        if &magic != TABLE_MAGIC {
            return Err(StorageError::InvalidMagic { found: magic });
        }

        let version = read_u8(reader, "header version")?;
        let page_size = read_u32(reader, "header page size")?;
        let num_records = read_u32(reader, "header record count")?;
        let schema_offset = read_u32(reader, "header schema offset")?;

        Ok(Self {
            magic,
            version,
            page_size,
            num_records,
            schema_offset,
        })
    }

    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self> {
        Self::from_reader(&mut bytes)
    }
}

impl fmt::Display for TableHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Magic: {}", String::from_utf8_lossy(&self.magic))?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Page Size: {}", self.page_size)?;
        writeln!(f, "Number of Records: {}", self.num_records)?;
        write!(f, "Schema Offset: {}", self.schema_offset)
    }
}
