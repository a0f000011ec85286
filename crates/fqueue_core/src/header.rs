//! The fixed control block at the start of every queue file.
//!
//! ## Header Format
//!
//! ```text
//! offset 0:  capacity     (8, LE u64)
//! offset 8:  head_offset  (8, LE u64)
//! offset 16: tail_offset  (8, LE u64)
//! offset 24: sequence     (8, LE u64)
//! offset 32: data region (capacity bytes)
//! ```
//!
//! Committing the header is the single point at which a mutation becomes
//! durable. It always happens after the data it describes has passed the
//! store's barrier, so a torn write leaves the header pointing at the
//! previous valid state.

use crate::error::{QueueError, QueueResult};
use crate::store::QueueStore;

/// Size of the header block in bytes.
pub const HEADER_SIZE: u64 = 32;

/// Persisted queue cursors.
///
/// Invariant: `head_offset <= tail_offset <= capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Size in bytes of the data region after the header.
    pub capacity: u64,
    /// Offset of the oldest unread frame, relative to the data region.
    pub head_offset: u64,
    /// Offset where the next frame will be written.
    pub tail_offset: u64,
    /// Last identifier assigned to a pushed record (0 if none).
    pub sequence: u64,
}

impl Header {
    /// Creates the header of a fresh queue.
    #[must_use]
    pub const fn new(capacity: u64) -> Self {
        Self {
            capacity,
            head_offset: 0,
            tail_offset: 0,
            sequence: 0,
        }
    }

    /// Bytes occupied by live frames.
    ///
    /// Zero for a header whose cursors are out of order.
    #[must_use]
    pub const fn used(&self) -> u64 {
        self.tail_offset.saturating_sub(self.head_offset)
    }

    /// Bytes available after the tail before growth is needed.
    ///
    /// Zero for a header whose tail is past its capacity.
    #[must_use]
    pub const fn free(&self) -> u64 {
        self.capacity.saturating_sub(self.tail_offset)
    }

    /// Returns true when the cursors meet.
    #[must_use]
    pub const fn is_drained(&self) -> bool {
        self.head_offset == self.tail_offset
    }

    /// Checks the cursor invariant.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStore` if `head_offset <= tail_offset <= capacity` does not hold.
    pub fn validate(&self) -> QueueResult<()> {
        if self.head_offset > self.tail_offset {
            return Err(QueueError::corrupt_store(format!(
                "head offset {} is past tail offset {}",
                self.head_offset, self.tail_offset
            )));
        }
        if self.tail_offset > self.capacity {
            return Err(QueueError::corrupt_store(format!(
                "tail offset {} is past capacity {}",
                self.tail_offset, self.capacity
            )));
        }
        Ok(())
    }

    /// Encodes the header block.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_SIZE as usize] {
        let mut buf = [0u8; HEADER_SIZE as usize];
        buf[0..8].copy_from_slice(&self.capacity.to_le_bytes());
        buf[8..16].copy_from_slice(&self.head_offset.to_le_bytes());
        buf[16..24].copy_from_slice(&self.tail_offset.to_le_bytes());
        buf[24..32].copy_from_slice(&self.sequence.to_le_bytes());
        buf
    }

    /// Decodes and validates a header block.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStore` if the block is short or the invariant fails.
    pub fn decode(data: &[u8]) -> QueueResult<Self> {
        let header = Self::decode_raw(data)?;
        header.validate()?;
        Ok(header)
    }

    /// Decodes a header block without checking the cursor invariant.
    ///
    /// For tools that need to show a damaged header as it is on disk.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStore` if fewer than 32 bytes are supplied.
    pub fn decode_raw(data: &[u8]) -> QueueResult<Self> {
        if data.len() < HEADER_SIZE as usize {
            return Err(QueueError::corrupt_store(format!(
                "header truncated: {} of {HEADER_SIZE} bytes",
                data.len()
            )));
        }

        let field = |i: usize| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&data[i * 8..i * 8 + 8]);
            u64::from_le_bytes(raw)
        };

        Ok(Self {
            capacity: field(0),
            head_offset: field(1),
            tail_offset: field(2),
            sequence: field(3),
        })
    }

    /// Reads the header from a store and checks it against the file size.
    ///
    /// A file longer than the header claims is accepted; a file shorter than
    /// `HEADER_SIZE + capacity` is not.
    ///
    /// # Errors
    ///
    /// Returns `CorruptStore` if the file is shorter than the header block,
    /// the invariant fails, or the data region is missing bytes.
    pub fn load(store: &QueueStore) -> QueueResult<Self> {
        let file_size = store.file_size()?;
        if file_size < HEADER_SIZE {
            return Err(QueueError::corrupt_store(format!(
                "file is {file_size} bytes, shorter than the {HEADER_SIZE}-byte header"
            )));
        }

        let header = Self::decode(&store.read_at(0, HEADER_SIZE as usize)?)?;
        let required = HEADER_SIZE.checked_add(header.capacity).ok_or_else(|| {
            QueueError::corrupt_store(format!("capacity {} overflows", header.capacity))
        })?;
        if file_size < required {
            return Err(QueueError::corrupt_store(format!(
                "header claims capacity {} but file holds only {} data bytes",
                header.capacity,
                file_size - HEADER_SIZE
            )));
        }
        Ok(header)
    }

    /// Writes the header block and passes the store's barrier.
    ///
    /// Callers must have already passed the barrier for any data this
    /// header describes.
    pub fn commit(&self, store: &mut QueueStore) -> QueueResult<()> {
        store.write_at(0, &self.encode())?;
        store.barrier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fqueue_storage::InMemoryBackend;

    fn store_with(bytes: Vec<u8>) -> QueueStore {
        QueueStore::new(Box::new(InMemoryBackend::with_data(bytes)), true)
    }

    #[test]
    fn new_header_is_empty() {
        let header = Header::new(128);
        assert_eq!(header.capacity, 128);
        assert!(header.is_drained());
        assert_eq!(header.used(), 0);
        assert_eq!(header.free(), 128);
        assert_eq!(header.sequence, 0);
    }

    #[test]
    fn encode_field_offsets() {
        let header = Header {
            capacity: 4,
            head_offset: 2,
            tail_offset: 3,
            sequence: 1,
        };
        let bytes = header.encode();
        assert_eq!(bytes[0], 4);
        assert_eq!(bytes[8], 2);
        assert_eq!(bytes[16], 3);
        assert_eq!(bytes[24], 1);
        assert_eq!(Header::decode(&bytes).unwrap(), header);
    }

    #[test]
    fn decode_raw_keeps_broken_cursors() {
        let header = Header {
            capacity: 1,
            head_offset: 2,
            tail_offset: 3,
            sequence: 4,
        };
        let bytes = header.encode();
        assert!(Header::decode(&bytes).is_err());
        assert_eq!(Header::decode_raw(&bytes).unwrap(), header);
        assert!(Header::decode_raw(&bytes[..31]).is_err());
    }

    #[test]
    fn used_and_free_saturate_on_broken_cursors() {
        let header = Header {
            capacity: 1,
            head_offset: 5,
            tail_offset: 3,
            sequence: 4,
        };
        assert_eq!(header.used(), 0);
        assert_eq!(header.free(), 0);
    }

    #[test]
    fn head_past_tail_is_corrupt() {
        let header = Header {
            capacity: 100,
            head_offset: 50,
            tail_offset: 10,
            sequence: 1,
        };
        let err = Header::decode(&header.encode()).unwrap_err();
        assert!(matches!(err, QueueError::CorruptStore { .. }));
    }

    #[test]
    fn tail_past_capacity_is_corrupt() {
        let header = Header {
            capacity: 10,
            head_offset: 0,
            tail_offset: 11,
            sequence: 1,
        };
        assert!(header.validate().is_err());
    }

    #[test]
    fn load_short_file_is_corrupt() {
        let store = store_with(vec![0u8; 31]);
        let err = Header::load(&store).unwrap_err();
        assert!(matches!(err, QueueError::CorruptStore { .. }));
    }

    #[test]
    fn load_missing_data_region_is_corrupt() {
        let mut bytes = Header::new(64).encode().to_vec();
        bytes.extend_from_slice(&[0u8; 10]);
        let err = Header::load(&store_with(bytes)).unwrap_err();
        assert!(matches!(err, QueueError::CorruptStore { .. }));
    }

    #[test]
    fn load_accepts_longer_file() {
        let mut bytes = Header::new(8).encode().to_vec();
        bytes.extend_from_slice(&[0u8; 64]);
        let header = Header::load(&store_with(bytes)).unwrap();
        assert_eq!(header.capacity, 8);
    }

    #[test]
    fn commit_then_load() {
        let mut store = store_with(Vec::new());
        store.allocate(40).unwrap();

        let header = Header {
            capacity: 40,
            head_offset: 16,
            tail_offset: 32,
            sequence: 2,
        };
        header.commit(&mut store).unwrap();
        assert_eq!(Header::load(&store).unwrap(), header);
    }

    #[test]
    fn zeroed_block_is_valid() {
        let header = Header::decode(&[0u8; 32]).unwrap();
        assert_eq!(header, Header::default());
    }
}
