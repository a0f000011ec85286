//! Error types for queue operations.

use std::io;
use thiserror::Error;

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Coarse classification of a [`QueueError`].
///
/// Every error belongs to exactly one of these four kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Underlying read, write, resize or flush failure.
    Io,
    /// Header invariants violated when opening a file.
    CorruptStore,
    /// `front`/`pop` on a queue with no live records.
    EmptyQueue,
    /// Operation not permitted in the current state.
    InvalidState,
}

/// Errors that can occur in queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] fqueue_storage::StorageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file's header or frames are inconsistent.
    #[error("corrupt store: {message}")]
    CorruptStore {
        /// Description of the corruption.
        message: String,
    },

    /// The queue holds no live records.
    #[error("queue is empty")]
    EmptyQueue,

    /// Operation not permitted in current state.
    #[error("invalid state: {message}")]
    InvalidState {
        /// Description of why the operation is invalid.
        message: String,
    },
}

impl QueueError {
    /// Creates a corrupt store error.
    pub fn corrupt_store(message: impl Into<String>) -> Self {
        Self::CorruptStore {
            message: message.into(),
        }
    }

    /// Creates an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Storage(_) | Self::Io(_) => ErrorKind::Io,
            Self::CorruptStore { .. } => ErrorKind::CorruptStore,
            Self::EmptyQueue => ErrorKind::EmptyQueue,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
        }
    }

    /// Returns true if the caller can retry after changing the queue's state.
    ///
    /// `EmptyQueue` clears after a push; `InvalidState` clears after draining.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::EmptyQueue | ErrorKind::InvalidState)
    }
}
