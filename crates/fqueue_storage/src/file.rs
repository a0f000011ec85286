//! File-based storage backend for persistent storage.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use fs2::FileExt;
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A file-based storage backend.
///
/// This backend provides persistent storage using OS file APIs.
/// Data survives process restarts.
///
/// # Durability
///
/// - `flush()` calls `File::flush()` to push data to the OS
/// - `sync()` calls `File::sync_all()` to ensure data and size are on disk
///
/// # Locking
///
/// No lock is taken by default. [`FileBackend::lock_exclusive`] takes a
/// non-blocking advisory lock that is held until the backend is dropped.
///
/// # Example
///
/// ```no_run
/// use fqueue_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("queue.dat")).unwrap();
/// backend.write_at(0, b"persistent data").unwrap();
/// backend.sync().unwrap();  // Ensure data is durable
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    file: RwLock<File>,
    size: RwLock<u64>,
    locked: bool,
    created: bool,
}

impl FileBackend {
    /// Opens or creates a file backend at the given path.
    ///
    /// If the file exists, it is opened for reading and writing and its
    /// contents are left untouched. If it doesn't exist, an empty file is
    /// created and [`FileBackend::created`] returns true.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let created = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path);

        match created {
            Ok(file) => Self::from_file(path, file, true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Self::open_existing(path),
            Err(e) => Err(e.into()),
        }
    }

    /// Opens an existing file backend; fails with `NotFound` if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn open_existing(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Self::from_file(path, file, false)
    }

    fn from_file(path: &Path, file: File, created: bool) -> StorageResult<Self> {
        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(file),
            size: RwLock::new(size),
            locked: false,
            created,
        })
    }

    /// Opens or creates a file backend, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or file cannot be opened.
    pub fn open_with_create_dirs(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::open(path)
    }

    /// Takes an exclusive advisory lock on the file without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Locked`] if another handle already holds the lock.
    pub fn lock_exclusive(&mut self) -> StorageResult<()> {
        if self.locked {
            return Ok(());
        }
        let file = self.file.read();
        if file.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked);
        }
        drop(file);
        self.locked = true;
        Ok(())
    }

    /// Returns true if this open created the file.
    ///
    /// An existing file is never reported as created, even when it is empty.
    #[must_use]
    pub fn created(&self) -> bool {
        self.created
    }

    /// Returns true if this backend holds the advisory lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileBackend {
    fn drop(&mut self) {
        if self.locked {
            let _ = FileExt::unlock(&*self.file.read());
        }
    }
}

impl StorageBackend for FileBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let size = *self.size.read();
        let end = offset.saturating_add(len as u64);

        if offset > size || end > size {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }

        if len == 0 {
            return Ok(Vec::new());
        }

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()> {
        if data.is_empty() {
            return Ok(());
        }

        let mut file = self.file.write();
        let mut size = self.size.write();

        file.seek(SeekFrom::Start(offset))?;
        file.write_all(data)?;
        *size = (*size).max(offset + data.len() as u64);

        Ok(())
    }

    fn set_len(&mut self, new_size: u64) -> StorageResult<()> {
        let file = self.file.write();
        let mut size = self.size.write();

        file.set_len(new_size)?;
        *size = new_size;

        Ok(())
    }

    fn flush(&mut self) -> StorageResult<()> {
        let mut file = self.file.write();
        file.flush()?;
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(*self.size.read())
    }

    fn sync(&mut self) -> StorageResult<()> {
        let file = self.file.write();
        file.sync_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_create_new() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let backend = FileBackend::open(&path).unwrap();
        assert_eq!(backend.size().unwrap(), 0);
        assert!(path.exists());
    }

    #[test]
    fn file_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.write_at(0, b"hello").unwrap();
        backend.write_at(5, b" world").unwrap();

        assert_eq!(backend.size().unwrap(), 11);
        assert_eq!(backend.read_at(0, 11).unwrap(), b"hello world");
    }

    #[test]
    fn file_overwrite_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.write_at(0, b"hello world").unwrap();
        backend.write_at(0, b"HELLO").unwrap();

        assert_eq!(backend.size().unwrap(), 11);
        assert_eq!(backend.read_at(0, 11).unwrap(), b"HELLO world");
    }

    #[test]
    fn file_write_past_end_zero_fills_gap() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.write_at(4, b"xy").unwrap();

        assert_eq!(backend.size().unwrap(), 6);
        assert_eq!(backend.read_at(0, 6).unwrap(), b"\0\0\0\0xy");
    }

    #[test]
    fn file_read_past_end_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.write_at(0, b"hello").unwrap();

        let result = backend.read_at(3, 5);
        assert!(matches!(result, Err(StorageError::ReadPastEnd { .. })));
    }

    #[test]
    fn file_set_len_grows_and_shrinks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.write_at(0, b"abc").unwrap();

        backend.set_len(64).unwrap();
        assert_eq!(backend.size().unwrap(), 64);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 64);
        assert_eq!(backend.read_at(0, 4).unwrap(), b"abc\0");

        backend.set_len(2).unwrap();
        assert_eq!(backend.size().unwrap(), 2);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 2);
        assert_eq!(backend.read_at(0, 2).unwrap(), b"ab");
    }

    #[test]
    fn file_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        {
            let mut backend = FileBackend::open(&path).unwrap();
            backend.write_at(0, b"persistent data").unwrap();
            backend.sync().unwrap();
        }

        {
            let backend = FileBackend::open(&path).unwrap();
            assert_eq!(backend.size().unwrap(), 15);
            assert_eq!(backend.read_at(0, 15).unwrap(), b"persistent data");
        }
    }

    #[test]
    fn file_open_existing_missing_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.bin");

        let result = FileBackend::open_existing(&path);
        match result {
            Err(StorageError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn file_empty_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.write_at(0, b"hello").unwrap();
        backend.write_at(100, b"").unwrap();

        assert_eq!(backend.size().unwrap(), 5);
        assert!(backend.read_at(2, 0).unwrap().is_empty());
    }

    #[test]
    fn file_create_with_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("path").join("test.bin");

        let backend = FileBackend::open_with_create_dirs(&path).unwrap();
        assert_eq!(backend.size().unwrap(), 0);
        assert!(path.exists());
    }

    #[test]
    fn file_flush_and_sync() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut backend = FileBackend::open(&path).unwrap();
        backend.write_at(0, b"data").unwrap();

        assert!(backend.flush().is_ok());
        assert!(backend.sync().is_ok());
    }

    #[test]
    fn file_exclusive_lock_blocks_second_handle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let mut first = FileBackend::open(&path).unwrap();
        first.lock_exclusive().unwrap();
        assert!(first.is_locked());

        let mut second = FileBackend::open(&path).unwrap();
        assert!(matches!(second.lock_exclusive(), Err(StorageError::Locked)));

        drop(first);
        assert!(second.lock_exclusive().is_ok());
    }

    #[test]
    fn file_created_only_by_first_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        assert!(FileBackend::open(&path).unwrap().created());

        // Still empty, but it already exists.
        let reopened = FileBackend::open(&path).unwrap();
        assert!(!reopened.created());
        assert_eq!(reopened.size().unwrap(), 0);
        assert!(!FileBackend::open_existing(&path).unwrap().created());
    }

    #[test]
    fn file_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.bin");

        let backend = FileBackend::open(&path).unwrap();
        assert_eq!(backend.path(), path);
    }
}
