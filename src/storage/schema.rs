use std::{
    fmt,
    io::{Read, Seek, SeekFrom, Write},
};

use serde::{Deserialize, Serialize};

use crate::{
    storage::{
        column::{Column, ColumnType},
        read_u32,
    },
    types::error::Result,
};

// Upper bound for the up-front allocation; a corrupt count must not reserve gigabytes.
const MAX_PREALLOCATED_COLUMNS: usize = 1024;

/// Ordered list of column definitions written at the header's schema offset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn add_column(&mut self, name: impl Into<Vec<u8>>, column_type: ColumnType) {
        self.columns.push(Column::new(name, column_type));
    }

    pub fn with_column(mut self, name: impl Into<Vec<u8>>, column_type: ColumnType) -> Self {
        self.add_column(name, column_type);
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get column by name (first match, names are not unique)
    pub fn get_column(&self, name: &[u8]) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }

    pub fn encoded_size(&self) -> usize {
        4 + self.columns.iter().map(Column::encoded_size).sum::<usize>()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.encoded_size());

        buffer.extend_from_slice(&(self.columns.len() as u32).to_le_bytes());
        for column in &self.columns {
            buffer.extend_from_slice(&column.to_bytes());
        }

        buffer
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Seek to `offset` and write the encoded schema there.
    pub fn write_at<W: Write + Seek>(&self, writer: &mut W, offset: u32) -> Result<()> {
        writer.seek(SeekFrom::Start(offset as u64))?;
        self.write_to(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Fails as a whole on the first column that cannot be decoded.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let column_count = read_u32(reader, "column count")? as usize;

        let mut columns = Vec::with_capacity(column_count.min(MAX_PREALLOCATED_COLUMNS));
        for _ in 0..column_count {
            columns.push(Column::from_reader(reader)?);
        }

        Ok(Self { columns })
    }

    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self> {
        Self::from_reader(&mut bytes)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in &self.columns {
            writeln!(f, "{}", column)?;
        }
        Ok(())
    }
}
