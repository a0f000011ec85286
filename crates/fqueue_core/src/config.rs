//! Queue configuration.

/// Default size of the data region reserved for a new queue file (100 MiB).
pub const DEFAULT_INITIAL_CAPACITY: u64 = 100 * 1024 * 1024;

/// Configuration for opening a queue.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Bytes reserved after the header when a new file is created.
    ///
    /// Ignored when the file already exists. Zero creates a header-only file
    /// that grows on the first push.
    pub initial_capacity: u64,

    /// Whether to create the file if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether to error if the file already holds a queue.
    pub error_if_exists: bool,

    /// Whether to fsync after every data write and header commit.
    ///
    /// When false, writes are still issued in the same order but durability
    /// is left to the operating system.
    pub sync_on_write: bool,

    /// Whether to take an exclusive advisory lock on the file at open.
    pub exclusive_lock: bool,

    /// Whether recovery checks frame indices in addition to frame bounds.
    pub verify_on_open: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            create_if_missing: true,
            error_if_exists: false,
            sync_on_write: true,
            exclusive_lock: false,
            verify_on_open: true,
        }
    }
}

impl QueueConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data region size for newly created files.
    #[must_use]
    pub const fn initial_capacity(mut self, bytes: u64) -> Self {
        self.initial_capacity = bytes;
        self
    }

    /// Sets whether to create the file if missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether to error if the file exists.
    #[must_use]
    pub const fn error_if_exists(mut self, value: bool) -> Self {
        self.error_if_exists = value;
        self
    }

    /// Sets whether to fsync after every write.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Sets whether to take an exclusive advisory lock at open.
    #[must_use]
    pub const fn exclusive_lock(mut self, value: bool) -> Self {
        self.exclusive_lock = value;
        self
    }

    /// Sets whether recovery verifies frame indices.
    #[must_use]
    pub const fn verify_on_open(mut self, value: bool) -> Self {
        self.verify_on_open = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QueueConfig::default();
        assert_eq!(config.initial_capacity, 104_857_600);
        assert!(config.create_if_missing);
        assert!(!config.error_if_exists);
        assert!(config.sync_on_write);
        assert!(!config.exclusive_lock);
        assert!(config.verify_on_open);
    }

    #[test]
    fn builder_pattern() {
        let config = QueueConfig::new()
            .initial_capacity(0)
            .create_if_missing(false)
            .sync_on_write(false)
            .exclusive_lock(true);

        assert_eq!(config.initial_capacity, 0);
        assert!(!config.create_if_missing);
        assert!(!config.sync_on_write);
        assert!(config.exclusive_lock);
    }
}
