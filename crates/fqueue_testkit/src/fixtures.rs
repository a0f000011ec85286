//! Test fixtures and queue helpers.
//!
//! Provides temporary file-backed queues that clean up after themselves and
//! small helpers for inspecting queue files from the outside.

use fqueue_core::{Queue, QueueConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the queue file inside a [`TestQueue`]'s temporary directory.
pub const QUEUE_FILE: &str = "queue.dat";

/// A file-backed test queue with automatic cleanup.
pub struct TestQueue {
    /// The queue instance. `None` only between [`TestQueue::close`] and
    /// [`TestQueue::reopen`].
    queue: Option<Queue>,
    path: PathBuf,
    config: QueueConfig,
    _temp_dir: TempDir,
}

impl TestQueue {
    /// Creates a queue with the given initial capacity in a fresh temp dir.
    pub fn with_capacity(initial_capacity: u64) -> Self {
        Self::with_config(QueueConfig::new().initial_capacity(initial_capacity))
    }

    /// Creates a queue with a custom configuration in a fresh temp dir.
    pub fn with_config(config: QueueConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join(QUEUE_FILE);
        let queue = Queue::open_with_config(&path, config.clone()).expect("Failed to open queue");

        Self {
            queue: Some(queue),
            path,
            config,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the path of the queue file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the on-disk size of the queue file.
    pub fn file_size(&self) -> u64 {
        file_size(&self.path)
    }

    /// Returns the raw bytes of the queue file.
    pub fn file_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.path).expect("Failed to read queue file")
    }

    /// Drops the open handle, keeping the file.
    pub fn close(&mut self) {
        if let Some(queue) = self.queue.take() {
            queue.close().expect("Failed to close queue");
        }
    }

    /// Closes and reopens the queue, running recovery.
    pub fn reopen(&mut self) {
        self.close();
        self.queue =
            Some(Queue::open_with_config(&self.path, self.config.clone()).expect("Failed to reopen queue"));
    }

    /// Attempts to reopen the queue, returning the open error if any.
    pub fn try_reopen(&mut self) -> fqueue_core::QueueResult<()> {
        self.close();
        self.queue = Some(Queue::open_with_config(&self.path, self.config.clone())?);
        Ok(())
    }
}

impl std::ops::Deref for TestQueue {
    type Target = Queue;

    fn deref(&self) -> &Self::Target {
        self.queue.as_ref().expect("queue is closed")
    }
}

impl std::ops::DerefMut for TestQueue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.queue.as_mut().expect("queue is closed")
    }
}

/// Returns the size of a file in bytes.
pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path)
        .expect("Failed to stat file")
        .len()
}

/// Runs a test with a temporary file-backed queue.
///
/// # Example
///
/// ```rust,ignore
/// use fqueue_testkit::with_temp_queue;
///
/// with_temp_queue(0, |queue, path| {
///     queue.push(b"x").unwrap();
/// });
/// ```
pub fn with_temp_queue<F, R>(initial_capacity: u64, f: F) -> R
where
    F: FnOnce(&mut Queue, &Path) -> R,
{
    let mut test_queue = TestQueue::with_capacity(initial_capacity);
    let path = test_queue.path().to_path_buf();
    f(&mut *test_queue, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fqueue_core::HEADER_SIZE;

    #[test]
    fn test_queue_creates_file() {
        let tq = TestQueue::with_capacity(64);
        assert!(tq.path().exists());
        assert_eq!(tq.file_size(), HEADER_SIZE + 64);
        assert!(tq.empty());
    }

    #[test]
    fn reopen_preserves_records() {
        let mut tq = TestQueue::with_capacity(0);
        tq.push(b"kept").unwrap();
        tq.reopen();
        assert_eq!(tq.records(), 1);
        assert_eq!(tq.pop().unwrap().payload, b"kept");
    }

    #[test]
    fn with_temp_queue_passes_path() {
        let size = with_temp_queue(0, |queue, path| {
            queue.push(b"abc").unwrap();
            file_size(path)
        });
        assert_eq!(size, HEADER_SIZE + 19);
    }
}
