//! Push command implementation.

use fqueue_core::{Queue, QueueConfig, DEFAULT_INITIAL_CAPACITY};
use std::path::Path;
use tracing::debug;

/// Runs the push command.
///
/// The queue file is created with `capacity` data bytes (default 100 MiB)
/// if it does not exist yet.
pub fn run(
    path: &Path,
    capacity: Option<u64>,
    file: Option<&Path>,
    payload: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = match (file, payload) {
        (Some(file), _) => std::fs::read(file)?,
        (None, Some(text)) => text.as_bytes().to_vec(),
        (None, None) => return Err("Payload or --file required for push".into()),
    };

    let index = push(path, capacity.unwrap_or(DEFAULT_INITIAL_CAPACITY), &data)?;
    println!("{}", index);
    Ok(())
}

fn push(path: &Path, capacity: u64, data: &[u8]) -> Result<u64, Box<dyn std::error::Error>> {
    let config = QueueConfig::new()
        .initial_capacity(capacity)
        .exclusive_lock(true);
    let mut queue = Queue::open_with_config(path, config)?;

    let index = queue.push(data)?;
    debug!(index, size = data.len(), capacity = queue.capacity(), "pushed from cli");
    queue.close()?;
    Ok(index)
}
