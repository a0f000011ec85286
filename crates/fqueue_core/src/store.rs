//! Backing store for a queue file.
//!
//! `QueueStore` owns the storage backend and knows how the file is split
//! into a fixed header block followed by the data region. It handles sizing,
//! growth, shrinkage and the durability barrier; it never interprets the
//! bytes it moves.

use crate::error::{QueueError, QueueResult};
use crate::header::HEADER_SIZE;
use fqueue_storage::StorageBackend;

/// Owns the backend of one queue file.
pub struct QueueStore {
    backend: Box<dyn StorageBackend>,
    sync_on_write: bool,
}

impl QueueStore {
    /// Wraps a backend.
    ///
    /// When `sync_on_write` is set, [`QueueStore::barrier`] fsyncs; otherwise it
    /// only flushes.
    pub fn new(backend: Box<dyn StorageBackend>, sync_on_write: bool) -> Self {
        Self {
            backend,
            sync_on_write,
        }
    }

    /// Returns true if the backend holds no bytes at all.
    ///
    /// A zero-length file is treated as not yet initialized.
    pub fn is_blank(&self) -> QueueResult<bool> {
        Ok(self.backend.size()? == 0)
    }

    /// Sizes a blank store to hold the header plus `capacity` data bytes.
    ///
    /// All bytes, including the header block, are zero afterwards.
    pub fn allocate(&mut self, capacity: u64) -> QueueResult<()> {
        let total = HEADER_SIZE
            .checked_add(capacity)
            .ok_or_else(|| QueueError::invalid_state(format!("capacity {capacity} too large")))?;
        self.backend.set_len(total)?;
        self.barrier()
    }

    /// Extends the data region so that at least `required` bytes fit.
    ///
    /// The new capacity is `max(capacity * 2, capacity + additional)`, which
    /// amortizes repeated small growths. Existing bytes are never moved. The
    /// file is only ever extended here; the caller commits the new capacity
    /// to the header afterwards.
    ///
    /// Returns the new capacity.
    pub fn grow(&mut self, capacity: u64, additional: u64) -> QueueResult<u64> {
        let doubled = capacity.saturating_mul(2);
        let linear = capacity.checked_add(additional).ok_or_else(|| {
            QueueError::invalid_state(format!(
                "cannot grow capacity {capacity} by {additional} bytes"
            ))
        })?;
        let new_capacity = doubled.max(linear);
        let total = HEADER_SIZE.checked_add(new_capacity).ok_or_else(|| {
            QueueError::invalid_state(format!("capacity {new_capacity} too large"))
        })?;

        // A previous grow may have extended the file without committing.
        if self.backend.size()? < total {
            self.backend.set_len(total)?;
        }
        self.barrier()?;
        Ok(new_capacity)
    }

    /// Truncates the file to exactly the header block.
    ///
    /// Must only be called once the queue has no live records.
    pub fn shrink_to_header(&mut self) -> QueueResult<()> {
        self.backend.set_len(HEADER_SIZE)?;
        self.barrier()
    }

    /// Reads `len` bytes at an absolute file offset.
    pub fn read_at(&self, offset: u64, len: usize) -> QueueResult<Vec<u8>> {
        Ok(self.backend.read_at(offset, len)?)
    }

    /// Writes bytes at an absolute file offset.
    pub fn write_at(&mut self, offset: u64, bytes: &[u8]) -> QueueResult<()> {
        self.backend.write_at(offset, bytes)?;
        Ok(())
    }

    /// Reads `len` bytes at an offset relative to the data region.
    pub fn read_data(&self, offset: u64, len: usize) -> QueueResult<Vec<u8>> {
        self.read_at(data_offset(offset)?, len)
    }

    /// Writes bytes at an offset relative to the data region.
    pub fn write_data(&mut self, offset: u64, bytes: &[u8]) -> QueueResult<()> {
        self.write_at(data_offset(offset)?, bytes)
    }

    /// Durability barrier issued after every data write and header commit.
    pub fn barrier(&mut self) -> QueueResult<()> {
        self.backend.flush()?;
        if self.sync_on_write {
            self.backend.sync()?;
        }
        Ok(())
    }

    /// Forces a full sync regardless of `sync_on_write`.
    pub fn sync(&mut self) -> QueueResult<()> {
        self.backend.flush()?;
        self.backend.sync()?;
        Ok(())
    }

    /// Returns the total file size in bytes.
    pub fn file_size(&self) -> QueueResult<u64> {
        Ok(self.backend.size()?)
    }
}

fn data_offset(offset: u64) -> QueueResult<u64> {
    HEADER_SIZE
        .checked_add(offset)
        .ok_or_else(|| QueueError::invalid_state(format!("data offset {offset} overflows")))
}
