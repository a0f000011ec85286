//! Frame encoding for queue records.
//!
//! ## Frame Format
//!
//! ```text
//! | index (8, LE u64) | size (8, LE u64) | payload (size bytes) |
//! ```
//!
//! Frames are packed back to back between the head and tail cursors.
//! There is no padding, checksum or trailer.

use crate::error::{QueueError, QueueResult};
use std::ops::Range;

/// Size of the fixed frame prefix (index + size).
pub const FRAME_PREFIX_SIZE: u64 = 16;

/// Returns the on-disk size of a frame carrying `payload_len` bytes.
///
/// Returns `None` on overflow.
#[must_use]
pub const fn frame_size(payload_len: u64) -> Option<u64> {
    FRAME_PREFIX_SIZE.checked_add(payload_len)
}

/// The decoded prefix of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Record identifier.
    pub index: u64,
    /// Payload length in bytes.
    pub size: u64,
}

impl FrameHeader {
    /// Returns the total frame length including the prefix.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStore` if the stored size overflows.
    pub fn frame_len(&self) -> QueueResult<u64> {
        frame_size(self.size).ok_or_else(|| {
            QueueError::corrupt_store(format!(
                "frame {} declares an impossible payload size {}",
                self.index, self.size
            ))
        })
    }

    /// Returns the byte range of the payload relative to the frame start.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStore` if the payload cannot be addressed on this platform.
    pub fn payload_range(&self) -> QueueResult<Range<usize>> {
        let start = FRAME_PREFIX_SIZE as usize;
        let len = usize::try_from(self.size).map_err(|_| {
            QueueError::corrupt_store(format!(
                "frame {} payload of {} bytes is not addressable",
                self.index, self.size
            ))
        })?;
        let end = start.checked_add(len).ok_or_else(|| {
            QueueError::corrupt_store(format!("frame {} payload range overflows", self.index))
        })?;
        Ok(start..end)
    }
}

/// Encodes a record into a frame.
#[must_use]
pub fn encode(index: u64, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(FRAME_PREFIX_SIZE as usize + payload.len());
    buf.extend_from_slice(&index.to_le_bytes());
    buf.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Decodes the prefix of a frame.
///
/// Only the first [`FRAME_PREFIX_SIZE`] bytes are read; the payload is not
/// required to be present, so callers can peek before deciding to copy.
///
/// # Errors
///
/// Returns `CorruptStore` if fewer than 16 bytes are supplied.
pub fn decode(bytes: &[u8]) -> QueueResult<FrameHeader> {
    if bytes.len() < FRAME_PREFIX_SIZE as usize {
        return Err(QueueError::corrupt_store(format!(
            "frame prefix truncated: {} of {} bytes",
            bytes.len(),
            FRAME_PREFIX_SIZE
        )));
    }

    let index = read_u64(&bytes[0..8]);
    let size = read_u64(&bytes[8..16]);
    Ok(FrameHeader { index, size })
}

/// Decodes a complete frame and borrows its payload.
///
/// # Errors
///
/// Returns `CorruptStore` if the prefix is truncated or the payload is
/// shorter than the declared size.
pub fn decode_frame(bytes: &[u8]) -> QueueResult<(FrameHeader, &[u8])> {
    let header = decode(bytes)?;
    let range = header.payload_range()?;
    let payload = bytes.get(range).ok_or_else(|| {
        QueueError::corrupt_store(format!(
            "frame {} payload truncated: declared {} bytes, {} available",
            header.index,
            header.size,
            bytes.len().saturating_sub(FRAME_PREFIX_SIZE as usize)
        ))
    })?;
    Ok((header, payload))
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    u64::from_le_bytes(raw)
}
