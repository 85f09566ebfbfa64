pub mod column;
pub mod fs;
pub mod header;
pub mod schema;
pub mod table;

use std::io::Read;

use crate::types::error::{Result, StorageError};

pub(crate) fn read_u8<R: Read>(reader: &mut R, field: &'static str) -> Result<u8> {
    let mut buf = [0u8; 1];
    reader
        .read_exact(&mut buf)
        .map_err(|e| StorageError::from_read(e, field))?;
    Ok(buf[0])
}

pub(crate) fn read_u32<R: Read>(reader: &mut R, field: &'static str) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .map_err(|e| StorageError::from_read(e, field))?;
    Ok(u32::from_le_bytes(buf))
}
