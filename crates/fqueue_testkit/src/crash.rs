//! Crash and fault simulation for queue files.
//!
//! This module provides a storage backend that can fail or tear writes on
//! demand, and helpers that damage queue files on disk. Together they let
//! tests check that a failed or interrupted operation leaves the file in
//! its last committed state.
//!
//! ## Test Strategy
//!
//! 1. **Torn frame write** - crash part way through a push's data write
//! 2. **Crash before commit** - data written, header commit fails
//! 3. **Failed growth** - resize fails before anything is written
//! 4. **Failed barrier** - sync fails after the data write
//!
//! After each fault the surviving image is reopened with recovery and
//! compared against what was committed before the fault.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fqueue_testkit::crash::CrashableBackend;
//!
//! let (backend, control) = CrashableBackend::new();
//! let mut queue = Queue::create_with_backend(Box::new(backend), config)?;
//! control.crash_after(8);
//! assert!(queue.push(b"payload").is_err());
//! let recovered = Queue::with_backend(Box::new(control.surviving_backend()), config)?;
//! ```

use fqueue_core::Header;
use fqueue_storage::{InMemoryBackend, StorageBackend, StorageError, StorageResult};
use parking_lot::RwLock;
use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared switches and file image for a [`CrashableBackend`].
///
/// The backend is moved into a queue, so tests keep this handle to arm
/// faults and to inspect what reached "disk".
#[derive(Debug)]
pub struct CrashControl {
    data: RwLock<Vec<u8>>,
    crash_after_bytes: AtomicUsize,
    bytes_written: AtomicUsize,
    crashed: AtomicBool,
    fail_on_sync: AtomicBool,
    fail_on_set_len: AtomicBool,
}

impl CrashControl {
    /// Sets the backend to crash once `bytes` more bytes have been written.
    ///
    /// The write that crosses the threshold is applied partially.
    pub fn crash_after(&self, bytes: usize) {
        self.bytes_written.store(0, Ordering::SeqCst);
        self.crash_after_bytes.store(bytes, Ordering::SeqCst);
    }

    /// Sets whether sync and flush should fail.
    pub fn set_fail_on_sync(&self, fail: bool) {
        self.fail_on_sync.store(fail, Ordering::SeqCst);
    }

    /// Sets whether resizing should fail.
    pub fn set_fail_on_set_len(&self, fail: bool) {
        self.fail_on_set_len.store(fail, Ordering::SeqCst);
    }

    /// Clears every armed fault.
    pub fn reset(&self) {
        self.crash_after_bytes.store(usize::MAX, Ordering::SeqCst);
        self.bytes_written.store(0, Ordering::SeqCst);
        self.crashed.store(false, Ordering::SeqCst);
        self.fail_on_sync.store(false, Ordering::SeqCst);
        self.fail_on_set_len.store(false, Ordering::SeqCst);
    }

    /// Returns whether a fault has fired.
    pub fn has_crashed(&self) -> bool {
        self.crashed.load(Ordering::SeqCst)
    }

    /// Returns a copy of the current image.
    pub fn image(&self) -> Vec<u8> {
        self.data.read().clone()
    }

    /// Returns an in-memory backend holding the current image.
    ///
    /// Opening a queue on it simulates a restart after the crash.
    pub fn surviving_backend(&self) -> InMemoryBackend {
        InMemoryBackend::with_data(self.image())
    }

    fn fault(&self, what: &str) -> StorageError {
        self.crashed.store(true, Ordering::SeqCst);
        StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("simulated crash during {what}"),
        ))
    }
}

/// A storage backend that can simulate crashes.
pub struct CrashableBackend {
    control: Arc<CrashControl>,
}

impl CrashableBackend {
    /// Creates an empty crashable backend and its control handle.
    pub fn new() -> (Self, Arc<CrashControl>) {
        Self::with_data(Vec::new())
    }

    /// Creates a crashable backend over an existing image.
    pub fn with_data(data: Vec<u8>) -> (Self, Arc<CrashControl>) {
        let control = Arc::new(CrashControl {
            data: RwLock::new(data),
            crash_after_bytes: AtomicUsize::new(usize::MAX),
            bytes_written: AtomicUsize::new(0),
            crashed: AtomicBool::new(false),
            fail_on_sync: AtomicBool::new(false),
            fail_on_set_len: AtomicBool::new(false),
        });
        (
            Self {
                control: Arc::clone(&control),
            },
            control,
        )
    }

    fn apply(&self, offset: u64, bytes: &[u8]) {
        let mut data = self.control.data.write();
        let start = offset as usize;
        let end = start + bytes.len();
        if end > data.len() {
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(bytes);
    }
}

impl StorageBackend for CrashableBackend {
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>> {
        let data = self.control.data.read();
        let size = data.len() as u64;
        let end = offset.saturating_add(len as u64);
        if end > size {
            return Err(StorageError::ReadPastEnd { offset, len, size });
        }
        let start = offset as usize;
        Ok(data[start..start + len].to_vec())
    }

    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> StorageResult<()> {
        let control = &self.control;
        let current = control
            .bytes_written
            .fetch_add(bytes.len(), Ordering::SeqCst);
        let threshold = control.crash_after_bytes.load(Ordering::SeqCst);

        if current >= threshold {
            return Err(control.fault("write"));
        }

        // Check if this write will cross the crash threshold
        if current + bytes.len() > threshold {
            let partial_len = threshold - current;
            if partial_len > 0 {
                self.apply(offset, &bytes[..partial_len]);
            }
            return Err(control.fault("partial write"));
        }

        self.apply(offset, bytes);
        Ok(())
    }

    fn set_len(&mut self, new_size: u64) -> StorageResult<()> {
        if self.control.fail_on_set_len.load(Ordering::SeqCst) {
            return Err(self.control.fault("resize"));
        }
        self.control.data.write().resize(new_size as usize, 0);
        Ok(())
    }

    fn flush(&mut self) -> StorageResult<()> {
        if self.control.fail_on_sync.load(Ordering::SeqCst) {
            return Err(self.control.fault("flush"));
        }
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.control.data.read().len() as u64)
    }

    fn sync(&mut self) -> StorageResult<()> {
        if self.control.fail_on_sync.load(Ordering::SeqCst) {
            return Err(self.control.fault("sync"));
        }
        Ok(())
    }
}

/// Overwrites the header block of a queue file.
pub fn write_header(path: &Path, header: &Header) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).open(path)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(&header.encode())?;
    file.sync_all()
}

/// Reads the header block of a queue file without validating it.
pub fn read_header(path: &Path) -> std::io::Result<Header> {
    let bytes = std::fs::read(path)?;
    Header::decode_raw(&bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
}

/// Cuts a queue file down to `len` bytes, as if later writes never landed.
pub fn tear_file(path: &Path, len: u64) -> std::io::Result<()> {
    let file = OpenOptions::new().write(true).open(path)?;
    file.set_len(len)?;
    file.sync_all()
}

/// Overwrites bytes at an absolute offset in a queue file.
pub fn scribble(path: &Path, offset: u64, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).open(path)?;
    file.seek(SeekFrom::Start(offset))?;
    file.write_all(bytes)?;
    file.sync_all()
}
