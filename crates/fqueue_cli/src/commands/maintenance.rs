//! Reset and truncate commands.

use super::{format_size, open_existing};
use std::path::Path;

/// Discards every live record. File size and sequence are kept.
pub fn reset(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut queue = open_existing(path)?;
    let discarded = queue.records();
    queue.reset()?;
    queue.close()?;

    println!("Discarded {} records", discarded);
    Ok(())
}

/// Shrinks an empty queue to its header.
pub fn truncate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut queue = open_existing(path)?;
    let before = queue.file_size()?;
    queue.truncate()?;
    let after = queue.file_size()?;
    queue.close()?;

    println!(
        "Released {} bytes ({} -> {})",
        format_size(before - after),
        format_size(before),
        format_size(after)
    );
    Ok(())
}
