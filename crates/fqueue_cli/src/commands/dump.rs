//! Dump command implementation.

use super::open_existing;
use fqueue_core::{Queue, Record};
use serde::Serialize;
use std::path::Path;

/// Live record representation for output.
#[derive(Debug, Serialize)]
pub struct RecordInfo {
    /// Record index.
    pub index: u64,
    /// Payload size in bytes.
    pub size: u64,
    /// Payload as lossy UTF-8.
    pub payload: String,
}

impl From<Record> for RecordInfo {
    fn from(record: Record) -> Self {
        Self {
            index: record.index,
            size: record.size,
            payload: String::from_utf8_lossy(&record.payload).into_owned(),
        }
    }
}

/// Runs the dump command.
pub fn run(path: &Path, limit: Option<usize>, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let queue = open_existing(path)?;
    let records = read_records(&queue, limit)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        _ => {
            print_text_output(&records, queue.records());
        }
    }

    Ok(())
}

fn read_records(
    queue: &Queue,
    limit: Option<usize>,
) -> Result<Vec<RecordInfo>, Box<dyn std::error::Error>> {
    let max_records = limit.unwrap_or(usize::MAX);
    let mut records = Vec::new();

    for record in queue.iter().take(max_records) {
        records.push(RecordInfo::from(record?));
    }

    Ok(records)
}

fn print_text_output(records: &[RecordInfo], total: u64) {
    println!("Live records ({} of {}):", records.len(), total);
    println!();
    for record in records {
        println!("  [{}] {} bytes: {}", record.index, record.size, record.payload);
    }
}
