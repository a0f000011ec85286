//! Queue statistics.
//!
//! Counters are process-local: they start at zero every time a queue is
//! opened and are never persisted.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-handle operation counters.
///
/// Counters are atomic so read-only operations such as `front` can update
/// them through a shared reference.
#[derive(Debug, Default)]
pub struct QueueStats {
    pushes: AtomicU64,
    pops: AtomicU64,
    peeks: AtomicU64,
    bytes_written: AtomicU64,
    bytes_read: AtomicU64,
    growths: AtomicU64,
    resets: AtomicU64,
    truncates: AtomicU64,
    errors: AtomicU64,
}

impl QueueStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_push(&self, frame_bytes: u64) {
        self.pushes.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(frame_bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_pop(&self, frame_bytes: u64) {
        self.pops.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(frame_bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_peek(&self, frame_bytes: u64) {
        self.peeks.fetch_add(1, Ordering::Relaxed);
        self.bytes_read.fetch_add(frame_bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_growth(&self) {
        self.growths.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reset(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_truncate(&self) {
        self.truncates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a snapshot of all counters.
    pub fn snapshot(&self) -> QueueStatsSnapshot {
        QueueStatsSnapshot {
            pushes: self.pushes.load(Ordering::Relaxed),
            pops: self.pops.load(Ordering::Relaxed),
            peeks: self.peeks.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            growths: self.growths.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
            truncates: self.truncates.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`QueueStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueStatsSnapshot {
    /// Successful pushes.
    pub pushes: u64,
    /// Successful pops.
    pub pops: u64,
    /// Successful `front` calls.
    pub peeks: u64,
    /// Frame bytes written by pushes.
    pub bytes_written: u64,
    /// Frame bytes read by pops and peeks.
    pub bytes_read: u64,
    /// Number of times the data region was extended.
    pub growths: u64,
    /// Number of resets.
    pub resets: u64,
    /// Number of truncates.
    pub truncates: u64,
    /// Mutations that failed after validation started.
    pub errors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let stats = QueueStats::new();
        assert_eq!(stats.snapshot(), QueueStatsSnapshot::default());
    }

    #[test]
    fn record_operations() {
        let stats = QueueStats::new();

        stats.record_push(26);
        stats.record_push(16);
        stats.record_pop(26);
        stats.record_peek(16);
        stats.record_growth();

        let snap = stats.snapshot();
        assert_eq!(snap.pushes, 2);
        assert_eq!(snap.bytes_written, 42);
        assert_eq!(snap.pops, 1);
        assert_eq!(snap.peeks, 1);
        assert_eq!(snap.bytes_read, 42);
        assert_eq!(snap.growths, 1);
    }
}
