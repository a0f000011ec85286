//! Inspect command implementation.

use super::{format_size, open_store};
use fqueue_core::{recover, FrameWalker, QueueStore, HEADER_SIZE};
use serde::Serialize;
use std::path::Path;

/// Queue inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Queue file path.
    pub path: String,
    /// Total file size in bytes.
    pub file_size: u64,
    /// Data region size from the header.
    pub capacity: u64,
    /// Offset of the oldest live frame.
    pub head_offset: u64,
    /// Offset one past the newest live frame.
    pub tail_offset: u64,
    /// Last index handed out by push.
    pub sequence: u64,
    /// Bytes between head and tail.
    pub used: u64,
    /// Bytes between tail and the end of the data region.
    pub free: u64,
    /// Number of live records.
    pub records: u64,
    /// Index of the oldest live record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_index: Option<u64>,
    /// Index of the newest live record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_index: Option<u64>,
    /// Bytes past the end of the data region.
    pub excess_bytes: u64,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No queue found at {:?}", path).into());
    }

    let store = open_store(path)?;
    let result = inspect(&store, path)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn inspect(store: &QueueStore, path: &Path) -> Result<InspectResult, Box<dyn std::error::Error>> {
    let recovered = recover(store, false)?;
    let header = recovered.header;

    let mut first_index = None;
    let mut last_index = None;
    for step in FrameWalker::new(store, header.head_offset, header.tail_offset) {
        let (_, frame) = step?;
        first_index.get_or_insert(frame.index);
        last_index = Some(frame.index);
    }

    Ok(InspectResult {
        path: path.display().to_string(),
        file_size: store.file_size()?,
        capacity: header.capacity,
        head_offset: header.head_offset,
        tail_offset: header.tail_offset,
        sequence: header.sequence,
        used: header.used(),
        free: header.free(),
        records: recovered.records,
        first_index,
        last_index,
        excess_bytes: recovered.excess_bytes,
    })
}

fn print_text_output(result: &InspectResult) {
    println!("fqueue Inspection");
    println!("=================");
    println!();
    println!("Path: {}", result.path);
    println!();
    println!("Storage:");
    println!("  File size:  {} bytes", format_size(result.file_size));
    println!("  Header:     {} bytes", HEADER_SIZE);
    println!("  Capacity:   {} bytes", format_size(result.capacity));
    println!("  Used:       {} bytes", format_size(result.used));
    println!("  Free:       {} bytes", format_size(result.free));
    if result.excess_bytes > 0 {
        println!("  Excess:     {} bytes", format_size(result.excess_bytes));
    }
    println!();
    println!("Cursors:");
    println!("  Head offset: {}", result.head_offset);
    println!("  Tail offset: {}", result.tail_offset);
    println!("  Sequence:    {}", result.sequence);
    println!();
    println!("Records:");
    println!("  Live records: {}", result.records);
    if let (Some(first), Some(last)) = (result.first_index, result.last_index) {
        println!("  Index range:  {}..={}", first, last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fqueue_core::Queue;
    use tempfile::tempdir;

    #[test]
    fn inspect_reports_live_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("queue.dat");
        {
            let mut queue = Queue::open_with_capacity(&path, 0).unwrap();
            for payload in [&b"a"[..], b"bb", b"ccc"] {
                queue.push(payload).unwrap();
            }
            queue.pop().unwrap();
        }

        let store = open_store(&path).unwrap();
        let result = inspect(&store, &path).unwrap();
        assert_eq!(result.records, 2);
        assert_eq!(result.sequence, 3);
        assert_eq!(result.first_index, Some(2));
        assert_eq!(result.last_index, Some(3));
        assert_eq!(result.head_offset, 17);
        assert_eq!(result.file_size, HEADER_SIZE + result.capacity);
    }

    #[test]
    fn inspect_empty_queue_has_no_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("queue.dat");
        drop(Queue::open_with_capacity(&path, 64).unwrap());

        let store = open_store(&path).unwrap();
        let result = inspect(&store, &path).unwrap();
        assert_eq!(result.records, 0);
        assert_eq!(result.first_index, None);
        assert_eq!(result.free, 64);
    }
}
