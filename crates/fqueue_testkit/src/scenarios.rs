//! Acceptance scenarios for the queue contract.
//!
//! Each scenario opens its own queue in a temporary directory, drives it
//! through the public API and panics on the first violated expectation.
//! Integration tests call them with different sizes.

use crate::fixtures::TestQueue;
use crate::generators::random_payload;
use fqueue_core::{ErrorKind, HEADER_SIZE};
use std::collections::VecDeque;

/// Pushes `iterations` random payloads, then drains them.
///
/// Checks that the record count matches, every popped record has the size
/// pushed in that position, and the last popped index equals the last
/// pushed one.
pub fn bulk_push_then_drain(iterations: usize, min: usize, max: usize) {
    let mut tq = TestQueue::with_capacity(fqueue_core::DEFAULT_INITIAL_CAPACITY);
    let mut sizes = VecDeque::with_capacity(iterations);
    let mut last_pushed = 0;

    for _ in 0..iterations {
        let payload = random_payload(min, max);
        last_pushed = tq.push(&payload).expect("push failed");
        sizes.push_back(payload.len() as u64);
    }
    assert_eq!(tq.records(), iterations as u64);

    let mut last_popped = 0;
    for _ in 0..iterations {
        let record = tq.pop().expect("pop failed");
        assert_eq!(Some(record.size), sizes.pop_front());
        last_popped = record.index;
    }

    assert_eq!(last_pushed, last_popped);
    assert_eq!(tq.records(), 0);
}

/// Starts from a header-only file and alternates push/pop, then truncates.
///
/// Checks index assignment, byte-for-byte round trips, growth of the file
/// past the header, and that `truncate` returns it to header size.
pub fn grow_from_zero_then_truncate(iterations: usize, min: usize, max: usize) {
    let mut tq = TestQueue::with_capacity(0);
    assert_eq!(tq.file_size(), HEADER_SIZE);

    for i in 0..iterations {
        let payload = random_payload(min, max);
        let index = tq.push(&payload).expect("push failed");
        assert_eq!(index, i as u64 + 1);
        assert_eq!(tq.records(), 1);

        let record = tq.pop().expect("pop failed");
        assert_eq!(tq.records(), 0);
        assert_eq!(record.size, payload.len() as u64);
        assert_eq!(record.payload, payload);
    }

    assert_ne!(tq.file_size(), HEADER_SIZE);
    tq.truncate().expect("truncate failed");
    assert_eq!(tq.file_size(), HEADER_SIZE);
}

/// Checks `records`, `empty` and `index` through two pushes and two pops,
/// then that popping an empty queue fails without touching the index.
pub fn counters_track_operations(min: usize, max: usize) {
    let mut tq = TestQueue::with_capacity(fqueue_core::DEFAULT_INITIAL_CAPACITY);
    assert_eq!(tq.records(), 0);
    assert!(tq.empty());
    assert_eq!(tq.index(), 0);

    let payload = random_payload(min, max);

    tq.push(&payload).expect("push failed");
    assert_eq!((tq.records(), tq.index()), (1, 1));

    tq.push(&payload).expect("push failed");
    assert_eq!((tq.records(), tq.index()), (2, 2));

    tq.pop().expect("pop failed");
    assert_eq!((tq.records(), tq.index()), (1, 2));

    tq.pop().expect("pop failed");
    assert_eq!((tq.records(), tq.index()), (0, 2));
    assert!(tq.empty());

    let err = tq.pop().expect_err("pop on empty queue succeeded");
    assert_eq!(err.kind(), ErrorKind::EmptyQueue);
    assert_eq!(tq.index(), 2);
}

/// Fills a header-only queue, resets it, and checks that the record count
/// drops to zero while the file size stays put.
pub fn reset_keeps_file_size(iterations: usize, min: usize, max: usize) {
    let mut tq = TestQueue::with_capacity(0);
    assert_eq!(tq.records(), 0);
    assert!(tq.empty());
    assert_eq!(tq.file_size(), HEADER_SIZE);

    for _ in 0..iterations {
        tq.push(&random_payload(min, max)).expect("push failed");
    }
    assert_eq!(tq.records(), iterations as u64);
    assert!(!tq.empty());

    let size = tq.file_size();
    tq.reset().expect("reset failed");
    assert_eq!(tq.records(), 0);
    assert!(tq.empty());
    assert_eq!(tq.file_size(), size);
}

/// Pushes payloads of 10, 20 and 30 bytes into a zero-capacity queue and
/// pops them back in order.
pub fn three_sizes_in_order() {
    let mut tq = TestQueue::with_capacity(0);
    for len in [10, 20, 30] {
        tq.push(&vec![len as u8; len]).expect("push failed");
    }
    assert_eq!(tq.records(), 3);

    for (index, len) in [(1u64, 10u64), (2, 20), (3, 30)] {
        let record = tq.pop().expect("pop failed");
        assert_eq!(record.index, index);
        assert_eq!(record.size, len);
        assert_eq!(record.payload, vec![len as u8; len as usize]);
    }
    assert_eq!(tq.records(), 0);
}

/// Overfills a small queue and checks every unpopped record survives growth.
pub fn growth_preserves_records(initial_capacity: u64, count: usize, min: usize, max: usize) {
    let mut tq = TestQueue::with_capacity(initial_capacity);
    let start_size = tq.file_size();

    // Pop a few first so growth happens with head past zero.
    let mut expected = VecDeque::new();
    for _ in 0..count {
        let payload = random_payload(min, max);
        let index = tq.push(&payload).expect("push failed");
        expected.push_back((index, payload));
        if expected.len() % 4 == 0 {
            let (index, payload) = expected.pop_front().expect("model empty");
            let record = tq.pop().expect("pop failed");
            assert_eq!((record.index, record.payload), (index, payload));
        }
    }
    assert!(tq.file_size() > start_size, "queue never grew");

    tq.reopen();
    assert_eq!(tq.records(), expected.len() as u64);
    for (index, payload) in expected {
        let record = tq.pop().expect("pop failed");
        assert_eq!(record.index, index);
        assert_eq!(record.payload, payload);
    }
}

/// Pushes five records, resets, pushes one more; the index keeps counting.
pub fn reset_keeps_sequence() {
    let mut tq = TestQueue::with_capacity(0);
    for _ in 0..5 {
        tq.push(b"before").expect("push failed");
    }
    tq.reset().expect("reset failed");
    tq.push(b"after").expect("push failed");

    assert_eq!(tq.index(), 6);
    assert_eq!(tq.records(), 1);
}
