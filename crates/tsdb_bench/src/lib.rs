//! Benchmark utilities.

use rand::Rng;
use tsdb_codec::{Sample, HORIZON};

/// Generate a random dotted series name such as `host17.cpu3`.
pub fn random_name(rng: &mut impl Rng) -> Vec<u8> {
    format!("host{}.cpu{}", rng.gen_range(0..1000), rng.gen_range(0..64)).into_bytes()
}

/// Generate `count` samples of one series at a fixed interval, with random values.
pub fn generate_series(name: &[u8], count: u64, interval: u64) -> Vec<Sample> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| Sample::new(name, HORIZON + i * interval, rng.gen_range(-1000.0..1000.0)))
        .collect()
}

/// Generate `count` random timestamps within the first decade of the window.
pub fn random_timestamps(count: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| HORIZON + rng.gen_range(0..315_360_000))
        .collect()
}
