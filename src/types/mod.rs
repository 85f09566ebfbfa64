pub mod error;

// Header layout
pub const PAGE_SIZE: u32 = 4096;
pub const HEADER_SIZE: usize = 4096; // Encoded header, independent of the page_size field
pub const HEADER_FIELDS_SIZE: usize = 17; // magic (4) + version (1) + 3 x u32
pub const HEADER_PADDING_SIZE: usize = HEADER_SIZE - HEADER_FIELDS_SIZE;

pub const TABLE_MAGIC: &[u8; 4] = b"MYTB";
pub const FORMAT_VERSION: u8 = 1;

pub const TABLE_FILE_EXTENSION: &str = "tbl";
pub const DEFAULT_STORAGE_DIR: &str = "customdatabase";
