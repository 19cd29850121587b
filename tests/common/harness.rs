//! tests/common/harness.rs
use kestrel_ack::{AckFrame, AckRange};
use rand::Rng;
use std::sync::Once;
use std::time::Duration;

/// Initializes tracing for tests, ensuring it's only done once.
pub fn init_tracing() {
    static TRACING_INIT: Once = Once::new();
    TRACING_INIT.call_once(|| {
        let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "kestrel_ack=debug".to_string());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Builds a random frame that satisfies the range invariants.
///
/// Range bounds and gaps are drawn so that every varint width shows up
/// across a few dozen frames.
pub fn random_frame<R: Rng>(rng: &mut R) -> AckFrame {
    let max_ranges = rng.random_range(1..=32);
    let mut largest: u64 = rng.random_range(0..(1u64 << 40));
    let mut ranges = Vec::with_capacity(max_ranges);

    for _ in 0..max_ranges {
        let length = rng.random_range(0..=largest.min(20_000));
        let smallest = largest - length;
        ranges.push(AckRange::new(smallest, largest));

        let gap: u64 = if rng.random_bool(0.1) {
            rng.random_range(0..(1u64 << 32))
        } else {
            rng.random_range(0..100)
        };
        match gap.checked_add(2).and_then(|d| smallest.checked_sub(d)) {
            Some(next_largest) => largest = next_largest,
            None => break,
        }
    }

    let delay = Duration::from_nanos(rng.random_range(0..10_000_000_000));
    AckFrame::new(ranges, delay).expect("generated ranges should validate")
}
