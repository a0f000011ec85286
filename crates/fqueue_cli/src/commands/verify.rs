//! Verify command implementation.

use super::open_store;
use fqueue_core::{FrameWalker, Header, IndexCheck, QueueStore};
use std::path::Path;

/// Verification result.
#[derive(Debug)]
pub struct VerifyResult {
    /// Number of frames checked.
    pub frames_checked: u64,
    /// Number of valid frames.
    pub valid_frames: u64,
    /// List of errors found.
    pub errors: Vec<String>,
}

impl VerifyResult {
    fn new() -> Self {
        Self {
            frames_checked: 0,
            valid_frames: 0,
            errors: Vec::new(),
        }
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the verify command.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Verifying queue at {:?}", path);
    println!();

    let store = open_store(path)?;
    let result = verify(&store)?;

    println!("Frames checked: {}", result.frames_checked);
    println!("Valid frames:   {}", result.valid_frames);
    for error in &result.errors {
        println!("  Error: {}", error);
    }

    println!();
    if result.is_ok() {
        println!("✓ Queue verification passed");
        Ok(())
    } else {
        println!("✗ Queue verification failed");
        Err("Verification failed".into())
    }
}

fn verify(store: &QueueStore) -> Result<VerifyResult, Box<dyn std::error::Error>> {
    let mut result = VerifyResult::new();

    let header = match Header::load(store) {
        Ok(header) => header,
        Err(e) => {
            result.errors.push(format!("Header: {}", e));
            return Ok(result);
        }
    };

    let mut indices = IndexCheck::new(header.sequence);
    for step in FrameWalker::new(store, header.head_offset, header.tail_offset) {
        result.frames_checked += 1;
        let (offset, frame) = match step {
            Ok(step) => step,
            Err(e) => {
                result.errors.push(e.to_string());
                break;
            }
        };

        match indices.check(offset, &frame) {
            Ok(()) => result.valid_frames += 1,
            Err(e) => result.errors.push(e.to_string()),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fqueue_core::{Queue, HEADER_SIZE};
    use std::io::{Seek, SeekFrom, Write};
    use tempfile::tempdir;

    #[test]
    fn healthy_queue_passes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("queue.dat");
        {
            let mut queue = Queue::open_with_capacity(&path, 0).unwrap();
            queue.push(b"one").unwrap();
            queue.push(b"two").unwrap();
        }

        let result = verify(&open_store(&path).unwrap()).unwrap();
        assert!(result.is_ok());
        assert_eq!(result.frames_checked, 2);
        assert_eq!(result.valid_frames, 2);
    }

    #[test]
    fn bad_index_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("queue.dat");
        {
            let mut queue = Queue::open_with_capacity(&path, 0).unwrap();
            queue.push(b"one").unwrap();
            queue.push(b"two").unwrap();
        }

        // Second frame starts after the first frame's 16-byte prefix and 3-byte payload.
        let mut file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.seek(SeekFrom::Start(HEADER_SIZE + 19)).unwrap();
        file.write_all(&1u64.to_le_bytes()).unwrap();
        drop(file);

        let result = verify(&open_store(&path).unwrap()).unwrap();
        assert!(!result.is_ok());
        assert_eq!(result.valid_frames, 1);
    }

    #[test]
    fn reports_the_same_error_as_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("queue.dat");
        {
            let mut queue = Queue::open_with_capacity(&path, 0).unwrap();
            queue.push(b"one").unwrap();
        }
        let mut file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.seek(SeekFrom::Start(HEADER_SIZE)).unwrap();
        file.write_all(&7u64.to_le_bytes()).unwrap();
        drop(file);

        let store = open_store(&path).unwrap();
        let open_err = fqueue_core::recover(&store, true).unwrap_err();
        let result = verify(&store).unwrap();
        assert_eq!(result.errors, vec![open_err.to_string()]);
    }

    #[test]
    fn short_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("queue.dat");
        std::fs::write(&path, [0u8; 8]).unwrap();

        let result = verify(&open_store(&path).unwrap()).unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.frames_checked, 0);
    }
}
