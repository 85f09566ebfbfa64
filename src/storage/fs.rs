//! Filesystem access used by the table file manager.
//!
//! `OsFileSystem` goes to disk, `MemoryFileSystem` keeps every file in a
//! shared byte store so table files can be created and read back without
//! touching a real directory.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fs::{self, File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

pub trait FileSystem {
    type File: Read + Write + Seek;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create a new file or truncate an existing one, opened for writing.
    fn create(&self, path: &Path) -> io::Result<Self::File>;

    /// Open an existing file for writing without truncating it.
    fn open_write(&self, path: &Path) -> io::Result<Self::File>;

    fn open_read(&self, path: &Path) -> io::Result<Self::File>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    type File = File;

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn create(&self, path: &Path) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
    }

    fn open_write(&self, path: &Path) -> io::Result<File> {
        OpenOptions::new().write(true).open(path)
    }

    fn open_read(&self, path: &Path) -> io::Result<File> {
        OpenOptions::new().read(true).open(path)
    }
}

type SharedBytes = Rc<RefCell<Vec<u8>>>;

#[derive(Debug, Default)]
struct MemoryStore {
    dirs: HashSet<PathBuf>,
    files: HashMap<PathBuf, SharedBytes>,
}

/// In-memory filesystem. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    store: Rc<RefCell<MemoryStore>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir_exists(&self, path: &Path) -> bool {
        self.store.borrow().dirs.contains(path)
    }

    pub fn file_exists(&self, path: &Path) -> bool {
        self.store.borrow().files.contains_key(path)
    }

    /// Snapshot of a file's contents.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.store
            .borrow()
            .files
            .get(path)
            .map(|data| data.borrow().clone())
    }

    /// Replace a file's contents, creating it if needed.
    pub fn insert_file(&self, path: impl Into<PathBuf>, data: Vec<u8>) {
        self.store
            .borrow_mut()
            .files
            .insert(path.into(), Rc::new(RefCell::new(data)));
    }

    fn parent_exists(store: &MemoryStore, path: &Path) -> bool {
        match path.parent() {
            None => true,
            Some(parent) if parent.as_os_str().is_empty() => true,
            Some(parent) => store.dirs.contains(parent),
        }
    }

    fn existing(&self, path: &Path) -> io::Result<SharedBytes> {
        self.store
            .borrow()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such file: {}", path.display()),
                )
            })
    }
}

impl FileSystem for MemoryFileSystem {
    type File = MemoryFile;

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut store = self.store.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            if store.files.contains_key(ancestor) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("file exists: {}", ancestor.display()),
                ));
            }
            store.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn create(&self, path: &Path) -> io::Result<MemoryFile> {
        let mut store = self.store.borrow_mut();
        if !Self::parent_exists(&store, path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            ));
        }
        if store.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", path.display()),
            ));
        }

        let data = store
            .files
            .entry(path.to_path_buf())
            .or_insert_with(|| Rc::new(RefCell::new(Vec::new())))
            .clone();
        data.borrow_mut().clear();

        Ok(MemoryFile::new(data, true))
    }

    fn open_write(&self, path: &Path) -> io::Result<MemoryFile> {
        Ok(MemoryFile::new(self.existing(path)?, true))
    }

    fn open_read(&self, path: &Path) -> io::Result<MemoryFile> {
        Ok(MemoryFile::new(self.existing(path)?, false))
    }
}

/// Handle onto a `MemoryFileSystem` entry with its own cursor.
#[derive(Debug)]
pub struct MemoryFile {
    data: SharedBytes,
    position: u64,
    writable: bool,
}

impl MemoryFile {
    fn new(data: SharedBytes, writable: bool) -> Self {
        Self {
            data,
            position: 0,
            writable,
        }
    }
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let data = self.data.borrow();
        let start = (self.position as usize).min(data.len());
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        self.position += n as u64;
        Ok(n)
    }
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.writable {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file opened read-only",
            ));
        }
        let mut data = self.data.borrow_mut();
        let start = self.position as usize;
        let end = start + buf.len();
        // Writing past the end zero-fills the gap
        if data.len() < end {
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(buf);
        self.position = end as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemoryFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let len = self.data.borrow().len() as i64;
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset as i64),
            SeekFrom::End(delta) => len.checked_add(delta),
            SeekFrom::Current(delta) => (self.position as i64).checked_add(delta),
        };
        match target {
            Some(target) if target >= 0 => {
                self.position = target as u64;
                Ok(self.position)
            }
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}
