//! Queue facade.

use crate::config::QueueConfig;
use crate::error::{QueueError, QueueResult};
use crate::frame::{self, FRAME_PREFIX_SIZE};
use crate::header::Header;
use crate::iterator::{self, RecordIter};
use crate::recovery;
use crate::stats::{QueueStats, QueueStatsSnapshot};
use crate::store::QueueStore;
use crate::types::Record;
use fqueue_storage::{FileBackend, InMemoryBackend, StorageBackend};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// A persistent FIFO record queue backed by a single file.
///
/// `Queue` exclusively owns its file. It can be moved between owners but not
/// cloned, and the file is closed when the handle is dropped. Mutating
/// operations take `&mut self`, so a handle supports exactly one operation at
/// a time; share it across threads only behind external synchronization.
///
/// Every mutation follows the same order: write data, pass the durability
/// barrier, then commit the header. A crash at any point leaves the file
/// describing the last committed state.
///
/// # Example
///
/// ```rust
/// use fqueue_core::{Queue, QueueConfig};
///
/// let mut queue = Queue::open_in_memory(QueueConfig::new().initial_capacity(0))?;
/// let index = queue.push(b"job-1")?;
/// assert_eq!(index, 1);
///
/// let record = queue.pop()?;
/// assert_eq!(record.index, 1);
/// assert_eq!(record.payload, b"job-1");
/// assert!(queue.empty());
/// # Ok::<(), fqueue_core::QueueError>(())
/// ```
pub struct Queue {
    store: QueueStore,
    header: Header,
    records: u64,
    path: Option<PathBuf>,
    stats: QueueStats,
}

impl Queue {
    /// Opens the queue at `path`, creating it with the default 100 MiB
    /// capacity if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened or created, and
    /// `CorruptStore` if an existing file fails recovery.
    pub fn open(path: impl AsRef<Path>) -> QueueResult<Self> {
        Self::open_with_config(path, QueueConfig::default())
    }

    /// Opens the queue at `path`, creating it with `initial_capacity` data
    /// bytes if it does not exist. The capacity is ignored for existing files.
    ///
    /// # Errors
    ///
    /// Same as [`Queue::open`].
    pub fn open_with_capacity(path: impl AsRef<Path>, initial_capacity: u64) -> QueueResult<Self> {
        Self::open_with_config(path, QueueConfig::new().initial_capacity(initial_capacity))
    }

    /// Opens the queue at `path` with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file is missing and `create_if_missing` is false (`Io`, `NotFound`)
    /// - The file exists and `error_if_exists` is set (`InvalidState`)
    /// - The advisory lock is held elsewhere (`Io`)
    /// - Recovery finds an inconsistent file (`CorruptStore`)
    pub fn open_with_config(path: impl AsRef<Path>, config: QueueConfig) -> QueueResult<Self> {
        let path = path.as_ref();

        let mut backend = if config.create_if_missing {
            FileBackend::open_with_create_dirs(path)?
        } else {
            FileBackend::open_existing(path)?
        };
        if config.exclusive_lock {
            backend.lock_exclusive()?;
        }

        // Only a file this call created is initialized; an existing file is
        // recovered even when it is empty.
        let created = backend.created();
        let mut queue = if created {
            Self::create_with_backend(Box::new(backend), config)?
        } else if config.error_if_exists {
            return Err(QueueError::invalid_state("queue file already exists"));
        } else {
            Self::with_backend(Box::new(backend), config)?
        };
        queue.path = Some(path.to_path_buf());
        Ok(queue)
    }

    /// Opens a queue held entirely in memory.
    ///
    /// The data region is allocated up front, so pass a small
    /// `initial_capacity` rather than the 100 MiB default.
    ///
    /// # Errors
    ///
    /// Returns an error only if the initial allocation fails.
    pub fn open_in_memory(config: QueueConfig) -> QueueResult<Self> {
        Self::create_with_backend(Box::new(InMemoryBackend::new()), config)
    }

    /// Initializes a new queue on an empty storage backend.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the backend already holds any bytes, and an
    /// I/O error if the allocation or header commit fails.
    pub fn create_with_backend(
        backend: Box<dyn StorageBackend>,
        config: QueueConfig,
    ) -> QueueResult<Self> {
        let mut store = QueueStore::new(backend, config.sync_on_write);
        if !store.is_blank()? {
            return Err(QueueError::invalid_state("backend already holds data"));
        }

        store.allocate(config.initial_capacity)?;
        let header = Header::new(config.initial_capacity);
        header.commit(&mut store)?;
        info!(capacity = header.capacity, "created queue");

        Ok(Self {
            store,
            header,
            records: 0,
            path: None,
            stats: QueueStats::new(),
        })
    }

    /// Opens an existing queue on an arbitrary storage backend.
    ///
    /// The backend is always recovered. An empty backend is not a queue and
    /// fails with `CorruptStore`; use [`Queue::create_with_backend`] for new
    /// ones.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStore` if recovery finds an inconsistent image.
    pub fn with_backend(backend: Box<dyn StorageBackend>, config: QueueConfig) -> QueueResult<Self> {
        let store = QueueStore::new(backend, config.sync_on_write);

        let recovered = recovery::recover(&store, config.verify_on_open)?;
        if recovered.excess_bytes > 0 {
            warn!(
                excess_bytes = recovered.excess_bytes,
                capacity = recovered.header.capacity,
                "file is longer than its header claims"
            );
        }
        info!(
            capacity = recovered.header.capacity,
            records = recovered.records,
            sequence = recovered.header.sequence,
            "recovered queue"
        );

        Ok(Self {
            store,
            header: recovered.header,
            records: recovered.records,
            path: None,
            stats: QueueStats::new(),
        })
    }

    /// Returns the number of live records.
    #[must_use]
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Returns true if there are no live records.
    #[must_use]
    pub fn empty(&self) -> bool {
        self.records == 0
    }

    /// Returns the last identifier assigned by `push` (0 if none).
    #[must_use]
    pub fn index(&self) -> u64 {
        self.header.sequence
    }

    /// Appends a record and returns its identifier.
    ///
    /// Grows the data region first if the frame does not fit after the tail.
    /// Zero-length payloads are allowed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if growing, writing or committing fails. The
    /// queue's committed state is unchanged in that case.
    pub fn push(&mut self, payload: &[u8]) -> QueueResult<u64> {
        let result = self.push_inner(payload);
        if result.is_err() {
            self.stats.record_error();
        }
        result
    }

    fn push_inner(&mut self, payload: &[u8]) -> QueueResult<u64> {
        let frame_len = frame::frame_size(payload.len() as u64)
            .ok_or_else(|| QueueError::invalid_state("payload too large"))?;
        let index = self
            .header
            .sequence
            .checked_add(1)
            .ok_or_else(|| QueueError::invalid_state("sequence counter exhausted"))?;

        let mut next = self.header;
        let end = next
            .tail_offset
            .checked_add(frame_len)
            .ok_or_else(|| QueueError::invalid_state("tail offset overflows"))?;

        if end > next.capacity {
            let capacity = self.store.grow(next.capacity, frame_len)?;
            debug!(from = next.capacity, to = capacity, "grew data region");
            next.capacity = capacity;
            self.stats.record_growth();
        }

        self.store
            .write_data(next.tail_offset, &frame::encode(index, payload))?;
        self.store.barrier()?;

        next.tail_offset = end;
        next.sequence = index;
        next.commit(&mut self.store)?;

        self.header = next;
        self.records += 1;
        self.stats.record_push(frame_len);
        trace!(index, size = payload.len(), "pushed record");
        Ok(index)
    }

    /// Returns a copy of the oldest record without removing it.
    ///
    /// # Errors
    ///
    /// Returns `EmptyQueue` if there are no live records.
    pub fn front(&self) -> QueueResult<Record> {
        let record = self.read_head()?;
        self.stats.record_peek(FRAME_PREFIX_SIZE + record.size);
        Ok(record)
    }

    /// Returns the identifier of the oldest record without copying its payload.
    ///
    /// # Errors
    ///
    /// Returns `EmptyQueue` if there are no live records.
    pub fn peek_index(&self) -> QueueResult<u64> {
        if self.header.is_drained() {
            return Err(QueueError::EmptyQueue);
        }
        let prefix = self
            .store
            .read_data(self.header.head_offset, FRAME_PREFIX_SIZE as usize)?;
        Ok(frame::decode(&prefix)?.index)
    }

    /// Removes and returns the oldest record.
    ///
    /// # Errors
    ///
    /// Returns `EmptyQueue` if there are no live records, or an I/O error if
    /// the header commit fails (the record then stays at the head).
    pub fn pop(&mut self) -> QueueResult<Record> {
        let record = self.read_head()?;
        let frame_len = FRAME_PREFIX_SIZE + record.size;

        let mut next = self.header;
        next.head_offset += frame_len;
        if let Err(e) = next.commit(&mut self.store) {
            self.stats.record_error();
            return Err(e);
        }

        self.header = next;
        self.records = self.records.saturating_sub(1);
        self.stats.record_pop(frame_len);
        trace!(index = record.index, size = record.size, "popped record");
        Ok(record)
    }

    fn read_head(&self) -> QueueResult<Record> {
        if self.header.is_drained() {
            return Err(QueueError::EmptyQueue);
        }

        let mut walker = iterator::FrameWalker::new(
            &self.store,
            self.header.head_offset,
            self.header.tail_offset,
        );
        let (offset, frame) = walker.next().ok_or(QueueError::EmptyQueue)??;
        iterator::read_payload(&self.store, offset, frame)
    }

    /// Discards all live records by rewinding both cursors to zero.
    ///
    /// Capacity, file size and the sequence counter are unchanged.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the header commit fails.
    pub fn reset(&mut self) -> QueueResult<()> {
        let mut next = self.header;
        next.head_offset = 0;
        next.tail_offset = 0;
        if let Err(e) = next.commit(&mut self.store) {
            self.stats.record_error();
            return Err(e);
        }

        let discarded = self.records;
        self.header = next;
        self.records = 0;
        self.stats.record_reset();
        debug!(discarded, sequence = next.sequence, "reset queue");
        Ok(())
    }

    /// Releases the data region, shrinking the file to the header alone.
    ///
    /// The sequence counter is kept, so identifiers are never reused.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if records remain, or an I/O error if the
    /// commit or shrink fails.
    pub fn truncate(&mut self) -> QueueResult<()> {
        if self.records != 0 || !self.header.is_drained() {
            return Err(QueueError::invalid_state(format!(
                "truncate requires an empty queue, {} records remain",
                self.records
            )));
        }

        let next = Header {
            capacity: 0,
            head_offset: 0,
            tail_offset: 0,
            sequence: self.header.sequence,
        };
        // Commit first: a crash before the shrink leaves a valid header over a longer file.
        if let Err(e) = next.commit(&mut self.store) {
            self.stats.record_error();
            return Err(e);
        }
        let released = self.header.capacity;
        self.header = next;

        if let Err(e) = self.store.shrink_to_header() {
            self.stats.record_error();
            return Err(e);
        }
        self.stats.record_truncate();
        debug!(released, "truncated queue");
        Ok(())
    }

    /// Iterates over live records oldest first without consuming them.
    pub fn iter(&self) -> RecordIter<'_> {
        RecordIter::new(&self.store, self.header.head_offset, self.header.tail_offset)
    }

    /// Returns a copy of the committed header.
    #[must_use]
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns the size of the data region in bytes.
    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.header.capacity
    }

    /// Returns the total size of the backing file in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    pub fn file_size(&self) -> QueueResult<u64> {
        self.store.file_size()
    }

    /// Returns the file path, or `None` for queues not opened from a path.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns a snapshot of this handle's counters.
    #[must_use]
    pub fn stats(&self) -> QueueStatsSnapshot {
        self.stats.snapshot()
    }

    /// Forces all written bytes to durable storage.
    ///
    /// Only needed when `sync_on_write` is off.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync fails.
    pub fn sync(&mut self) -> QueueResult<()> {
        self.store.sync()
    }

    /// Syncs and closes the queue.
    ///
    /// Dropping the handle also closes the file; `close` additionally
    /// reports a failing final sync.
    ///
    /// # Errors
    ///
    /// Returns an error if the final sync fails.
    pub fn close(mut self) -> QueueResult<()> {
        self.store.sync()?;
        debug!(records = self.records, sequence = self.header.sequence, "closed queue");
        Ok(())
    }
}

impl std::fmt::Debug for Queue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queue")
            .field("path", &self.path)
            .field("header", &self.header)
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}
