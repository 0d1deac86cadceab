//! Property-based test generators using proptest.
//!
//! Provides strategies for generating keys, samples and timestamps that stay
//! inside the representable window.

use proptest::prelude::*;
use tsdb_codec::{Key, Sample, MAX_TIMESTAMP, MIN_TIMESTAMP};

/// Strategy for generating representable timestamps.
pub fn timestamp_strategy() -> impl Strategy<Value = u64> {
    MIN_TIMESTAMP..=MAX_TIMESTAMP
}

/// Strategy for generating timestamps in the first few years of the window.
///
/// Dense enough that generated series frequently share timestamps.
pub fn recent_timestamp_strategy() -> impl Strategy<Value = u64> {
    MIN_TIMESTAMP..MIN_TIMESTAMP + 100_000_000
}

/// Strategy for generating dotted metric names such as `host1.cpu.load`.
pub fn series_name_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,15}(\\.[a-z0-9_]{1,15}){0,3}")
        .expect("Invalid regex")
        .prop_map(String::into_bytes)
}

/// Strategy for generating arbitrary non-empty name bytes.
pub fn raw_name_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..64)
}

/// Strategy for generating finite sample values.
pub fn sample_value_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6f64..1.0e6,
        (-1_000_000i64..1_000_000).prop_map(|n| n as f64 / 1000.0),
    ]
}

/// Strategy for generating samples.
pub fn sample_strategy() -> impl Strategy<Value = Sample> {
    (series_name_strategy(), timestamp_strategy(), sample_value_strategy())
        .prop_map(|(name, timestamp, value)| Sample::new(name, timestamp, value))
}

/// Strategy for generating keys of every namespace.
pub fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        raw_name_strategy().prop_map(Key::SeriesName),
        (raw_name_strategy(), timestamp_strategy())
            .prop_map(|(name, timestamp)| Key::SeriesSample { name, timestamp }),
        raw_name_strategy().prop_map(Key::HashName),
        raw_name_strategy().prop_map(Key::HashKey),
    ]
}

/// Strategy for generating a batch of samples for one series.
pub fn series_batch_strategy(
    min_points: usize,
    max_points: usize,
) -> impl Strategy<Value = (Vec<u8>, Vec<(u64, f64)>)> {
    (
        series_name_strategy(),
        prop::collection::vec(
            (recent_timestamp_strategy(), sample_value_strategy()),
            min_points..max_points,
        ),
    )
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
