//! # fqueue Core
//!
//! A persistent, single-file FIFO record queue.
//!
//! Every pushed record receives a permanent, strictly increasing identifier.
//! Records are appended after the tail and consumed from the head; the file
//! survives process restarts and is recovered on open.
//!
//! This crate provides:
//! - Frame encoding for records
//! - The fixed header block and its commit protocol
//! - Growth and shrinkage of the backing file
//! - Recovery of cursors and record count from an existing file
//! - The [`Queue`] handle exposing push, pop, front, reset and truncate
//!
//! ## File Layout
//!
//! All integers are little-endian u64.
//!
//! ```text
//! | capacity | head_offset | tail_offset | sequence | data region (capacity bytes) |
//! ```
//!
//! The data region holds frames packed from `head_offset` to `tail_offset`:
//!
//! ```text
//! | index (8) | size (8) | payload (size) |
//! ```
//!
//! ## Space Policy
//!
//! The data region is append-only between resets. Popped frames are not
//! reclaimed until [`Queue::reset`] rewinds the cursors (capacity retained)
//! or [`Queue::truncate`] releases the data region (requires an empty queue).
//! When a push does not fit, the region grows to
//! `max(capacity * 2, capacity + frame_size)` without moving existing bytes.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
pub mod frame;
mod header;
mod iterator;
mod queue;
mod recovery;
mod stats;
mod store;
mod types;

pub use config::{QueueConfig, DEFAULT_INITIAL_CAPACITY};
pub use error::{ErrorKind, QueueError, QueueResult};
pub use frame::{FrameHeader, FRAME_PREFIX_SIZE};
pub use header::{Header, HEADER_SIZE};
pub use iterator::{FrameWalker, RecordIter};
pub use queue::Queue;
pub use recovery::{recover, IndexCheck, Recovered};
pub use stats::{QueueStats, QueueStatsSnapshot};
pub use store::QueueStore;
pub use types::Record;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
