//! CLI command implementations.

pub mod dump;
pub mod inspect;
pub mod maintenance;
pub mod pop;
pub mod push;
pub mod verify;

use fqueue_core::{Queue, QueueConfig, QueueResult, QueueStore};
use fqueue_storage::FileBackend;
use std::path::Path;

/// Opens an existing queue file for a mutating command.
///
/// Missing files are not created and the advisory lock is taken so the CLI
/// never races a running producer or consumer.
pub(crate) fn open_existing(path: &Path) -> QueueResult<Queue> {
    Queue::open_with_config(
        path,
        QueueConfig::new()
            .create_if_missing(false)
            .exclusive_lock(true),
    )
}

/// Wraps an existing file in a store without running recovery.
pub(crate) fn open_store(path: &Path) -> QueueResult<QueueStore> {
    let backend = FileBackend::open_existing(path)?;
    Ok(QueueStore::new(Box::new(backend), false))
}

/// Formats a byte count for humans.
pub(crate) fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{}", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
