//! Core type definitions for fqueue.

use std::fmt;

/// A record read from the queue.
///
/// `index` is the identifier assigned when the record was pushed. It is
/// unique for the life of the file and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Identifier assigned at push time.
    pub index: u64,
    /// Owned copy of the payload bytes.
    pub payload: Vec<u8>,
    /// Payload length in bytes.
    pub size: u64,
}

impl Record {
    /// Creates a record from an index and payload.
    #[must_use]
    pub fn new(index: u64, payload: Vec<u8>) -> Self {
        let size = payload.len() as u64;
        Self {
            index,
            payload,
            size,
        }
    }

    /// Returns the payload length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Returns true for a zero-length payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Consumes the record and returns its payload.
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record:{} ({} bytes)", self.index, self.size)
    }
}
