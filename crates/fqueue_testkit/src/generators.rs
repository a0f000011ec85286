//! Payload generators.
//!
//! Random payloads with sizes drawn uniformly from a range, plus proptest
//! strategies for property-based tests.

use proptest::prelude::*;
use rand::Rng;

/// Smallest payload used by the acceptance scenarios.
pub const MIN_PAYLOAD: usize = 47;

/// Largest payload used by the acceptance scenarios (33 KiB).
pub const MAX_PAYLOAD: usize = 33 * 1024;

/// Generates a random payload whose length is uniform in `min..=max`.
pub fn random_payload(min: usize, max: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(min..=max);
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf[..]);
    buf
}

/// Generates `count` random payloads with lengths uniform in `min..=max`.
pub fn random_payloads(count: usize, min: usize, max: usize) -> Vec<Vec<u8>> {
    (0..count).map(|_| random_payload(min, max)).collect()
}

/// Strategy for arbitrary payloads, including empty ones.
pub fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2048)
}

/// Strategy for a batch of payloads to push in order.
pub fn payload_batch_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..256), 1..64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_payload_respects_bounds() {
        for _ in 0..100 {
            let payload = random_payload(3, 9);
            assert!((3..=9).contains(&payload.len()));
        }
    }

    #[test]
    fn random_payload_fixed_size() {
        assert_eq!(random_payload(5, 5).len(), 5);
        assert!(random_payload(0, 0).is_empty());
    }

    #[test]
    fn random_payloads_count() {
        let batch = random_payloads(10, MIN_PAYLOAD, MIN_PAYLOAD + 1);
        assert_eq!(batch.len(), 10);
    }
}
