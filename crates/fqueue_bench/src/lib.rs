//! Benchmark utilities.

use fqueue_core::{Queue, QueueConfig};
use rand::Rng;

/// Payload sizes shared by the queue and codec benches.
pub const PAYLOAD_SIZES: [usize; 4] = [64, 256, 1024, 4096];

/// Generate random payload data of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Opens an in-memory queue preloaded with `count` records of `payload_size` bytes.
pub fn filled_memory_queue(count: usize, payload_size: usize) -> Queue {
    let mut queue = Queue::open_in_memory(QueueConfig::new().initial_capacity(0))
        .expect("failed to open in-memory queue");
    let data = random_data(payload_size);
    for _ in 0..count {
        queue.push(&data).expect("failed to preload queue");
    }
    queue
}
