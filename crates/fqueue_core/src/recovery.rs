//! Rebuilding in-memory queue state from an existing file.
//!
//! ## Recovery Policy
//!
//! The header's cursors are authoritative. Recovery never rewrites the file;
//! it only checks that what the header describes can be trusted.
//!
//! ### Fatal Conditions (open fails with `CorruptStore`)
//!
//! - File shorter than the header block
//! - `head_offset <= tail_offset <= capacity` violated
//! - Data region shorter than `capacity`
//! - A frame between head and tail crosses the tail
//! - With index verification on: a frame index that is not strictly
//!   increasing, or that exceeds the header's sequence
//!
//! ### Tolerated Conditions
//!
//! - File longer than `HEADER_SIZE + capacity` (a grow whose header commit
//!   never happened); the extra bytes are reported and reused by the next grow
//! - Garbage after the tail (a push whose header commit never happened)

use crate::error::{QueueError, QueueResult};
use crate::frame::FrameHeader;
use crate::header::{Header, HEADER_SIZE};
use crate::iterator::FrameWalker;
use crate::store::QueueStore;

/// State reconstructed from a queue file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recovered {
    /// The committed header.
    pub header: Header,
    /// Number of frames between head and tail.
    pub records: u64,
    /// Bytes present beyond `HEADER_SIZE + capacity`.
    pub excess_bytes: u64,
}

/// Checks that frame indices along a walk are strictly increasing and
/// within `1..=sequence`.
///
/// Every frame is remembered whether or not it passed, so one bad index
/// produces one error rather than failing the frames after it too.
#[derive(Debug, Clone, Copy)]
pub struct IndexCheck {
    sequence: u64,
    last: Option<u64>,
}

impl IndexCheck {
    /// Starts a check against the header's `sequence`.
    #[must_use]
    pub const fn new(sequence: u64) -> Self {
        Self {
            sequence,
            last: None,
        }
    }

    /// Checks the next frame of the walk.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStore` if the index is out of range or does not
    /// follow the previous one.
    pub fn check(&mut self, offset: u64, frame: &FrameHeader) -> QueueResult<()> {
        let prev = self.last.replace(frame.index);
        if frame.index == 0 || frame.index > self.sequence {
            return Err(QueueError::corrupt_store(format!(
                "frame at offset {offset} has index {} outside 1..={}",
                frame.index, self.sequence
            )));
        }
        match prev {
            Some(prev) if frame.index <= prev => Err(QueueError::corrupt_store(format!(
                "frame at offset {offset} has index {} after index {prev}",
                frame.index
            ))),
            _ => Ok(()),
        }
    }
}

/// Loads the header and walks the live frames.
///
/// # Errors
///
/// Returns `CorruptStore` for any fatal condition listed in the module docs,
/// or an I/O error if the store cannot be read.
pub fn recover(store: &QueueStore, verify_indices: bool) -> QueueResult<Recovered> {
    let header = Header::load(store)?;
    let excess_bytes = store.file_size()? - (HEADER_SIZE + header.capacity);

    let mut records = 0u64;
    let mut indices = IndexCheck::new(header.sequence);
    for step in FrameWalker::new(store, header.head_offset, header.tail_offset) {
        let (offset, frame) = step?;
        if verify_indices {
            indices.check(offset, &frame)?;
        }
        records += 1;
    }

    Ok(Recovered {
        header,
        records,
        excess_bytes,
    })
}
