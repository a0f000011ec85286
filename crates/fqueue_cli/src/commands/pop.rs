//! Pop command implementation.

use super::open_existing;
use fqueue_core::{ErrorKind, Record};
use std::path::Path;

/// Runs the pop command.
///
/// An empty queue is reported on stdout and is not an error.
pub fn run(path: &Path, peek: bool) -> Result<(), Box<dyn std::error::Error>> {
    match take(path, peek) {
        Ok(record) => {
            println!("index: {}", record.index);
            println!("size:  {}", record.size);
            println!("{}", String::from_utf8_lossy(&record.payload));
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::EmptyQueue => {
            println!("Queue is empty");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn take(path: &Path, peek: bool) -> fqueue_core::QueueResult<Record> {
    let mut queue = open_existing(path)?;
    let record = if peek { queue.front()? } else { queue.pop()? };
    queue.close()?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fqueue_core::Queue;
    use tempfile::tempdir;

    #[test]
    fn peek_then_pop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("queue.dat");
        {
            let mut queue = Queue::open_with_capacity(&path, 0).unwrap();
            queue.push(b"job").unwrap();
        }

        assert_eq!(take(&path, true).unwrap().index, 1);
        assert_eq!(take(&path, false).unwrap().payload, b"job");
        assert_eq!(take(&path, false).unwrap_err().kind(), ErrorKind::EmptyQueue);
        assert!(run(&path, false).is_ok());
    }
}
