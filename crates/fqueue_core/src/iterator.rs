//! Iteration over the live frames of a queue.
//!
//! [`FrameWalker`] steps from one frame prefix to the next without reading
//! payloads; recovery uses it to count records and check frame bounds.
//! [`RecordIter`] builds on it to yield owned [`Record`]s in FIFO order
//! without moving the queue's cursors.

use crate::error::{QueueError, QueueResult};
use crate::frame::{self, FrameHeader, FRAME_PREFIX_SIZE};
use crate::store::QueueStore;
use crate::types::Record;

/// Walks frame prefixes between two data-region offsets.
///
/// Each step yields `(offset, FrameHeader)`. A frame whose prefix or
/// payload would cross `end` is reported as `CorruptStore` and stops the
/// walk.
pub struct FrameWalker<'a> {
    store: &'a QueueStore,
    offset: u64,
    end: u64,
    finished: bool,
}

impl<'a> FrameWalker<'a> {
    /// Creates a walker over `[start, end)` of the data region.
    pub fn new(store: &'a QueueStore, start: u64, end: u64) -> Self {
        Self {
            store,
            offset: start,
            end,
            finished: start >= end,
        }
    }

    fn step(&mut self) -> QueueResult<(u64, FrameHeader)> {
        let offset = self.offset;
        let remaining = self.end - offset;
        if remaining < FRAME_PREFIX_SIZE {
            return Err(QueueError::corrupt_store(format!(
                "frame prefix at offset {offset} crosses the tail ({remaining} bytes left)"
            )));
        }

        let prefix = self.store.read_data(offset, FRAME_PREFIX_SIZE as usize)?;
        let header = frame::decode(&prefix)?;
        let len = header.frame_len()?;
        if len > remaining {
            return Err(QueueError::corrupt_store(format!(
                "frame {} at offset {offset} declares {} payload bytes, crossing the tail",
                header.index, header.size
            )));
        }

        self.offset = offset + len;
        Ok((offset, header))
    }
}

impl Iterator for FrameWalker<'_> {
    type Item = QueueResult<(u64, FrameHeader)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.step();
        if result.is_err() || self.offset >= self.end {
            self.finished = true;
        }
        Some(result)
    }
}

/// Read-only FIFO iterator over live records.
///
/// Obtained from [`crate::Queue::iter`]. The queue cannot be mutated while
/// the iterator is alive.
pub struct RecordIter<'a> {
    walker: FrameWalker<'a>,
}

impl<'a> RecordIter<'a> {
    pub(crate) fn new(store: &'a QueueStore, start: u64, end: u64) -> Self {
        Self {
            walker: FrameWalker::new(store, start, end),
        }
    }
}

impl Iterator for RecordIter<'_> {
    type Item = QueueResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let (offset, header) = match self.walker.next()? {
            Ok(step) => step,
            Err(e) => return Some(Err(e)),
        };
        Some(read_payload(self.walker.store, offset, header))
    }
}

/// Copies the payload of a frame whose prefix has already been decoded.
pub(crate) fn read_payload(
    store: &QueueStore,
    offset: u64,
    header: FrameHeader,
) -> QueueResult<Record> {
    let len = header.payload_range()?.len();
    let payload = store.read_data(offset + FRAME_PREFIX_SIZE, len)?;
    Ok(Record {
        index: header.index,
        payload,
        size: header.size,
    })
}
