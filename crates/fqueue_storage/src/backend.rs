//! Storage backend trait definition.

use crate::error::StorageResult;

/// A low-level storage backend for a queue file.
///
/// Storage backends are **opaque byte stores**. They provide positional
/// reads and writes, resizing, and durability barriers. The queue engine
/// owns all format interpretation - backends do not understand headers
/// or frames.
///
/// # Invariants
///
/// - `read_at` returns exactly the bytes previously written at that offset
/// - `write_at` never moves bytes outside the written range
/// - `set_len` preserves every byte below the smaller of the old and new size
/// - `sync` ensures all written data and the current size are durable
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The read would extend beyond the current size
    /// - An I/O error occurs
    fn read_at(&self, offset: u64, len: usize) -> StorageResult<Vec<u8>>;

    /// Writes `data` at `offset`.
    ///
    /// Writing past the current end extends the storage; any gap between
    /// the old end and `offset` reads back as zeros.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> StorageResult<()>;

    /// Resizes the storage to exactly `new_size` bytes.
    ///
    /// Growing zero-fills the new tail. Shrinking discards everything at
    /// or after `new_size`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resize fails.
    fn set_len(&mut self, new_size: u64) -> StorageResult<()>;

    /// Flushes buffered writes to the operating system.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    fn flush(&mut self) -> StorageResult<()>;

    /// Returns the current size of the storage in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Syncs all data and metadata to durable storage.
    ///
    /// This is a stronger guarantee than `flush` - after it returns, all
    /// previously written bytes and the current size survive power loss.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&mut self) -> StorageResult<()>;
}
