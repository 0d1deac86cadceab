//! Store-level integration helpers.
//!
//! Drives the codec against [`OrderedStore`] and checks what range scans
//! return against a model of what was written.

use crate::fixtures::{load_series, store_samples, OrderedStore};
use std::collections::BTreeMap;
use tsdb_codec::{decode_value, encode_value, CodecResult, Sample};

/// A test harness pairing a store with a model of its expected contents.
#[derive(Debug, Default)]
pub struct SeriesHarness {
    /// The store under test.
    pub store: OrderedStore,
    expected: BTreeMap<(Vec<u8>, u64), f64>,
}

impl SeriesHarness {
    /// Creates a harness with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a sample and records the value the store should return for it.
    pub fn write(&mut self, name: &[u8], timestamp: u64, value: f64) {
        let sample = Sample::new(name, timestamp, value);
        store_samples(&self.store, std::slice::from_ref(&sample));
        self.expected
            .insert((name.to_vec(), timestamp), rounded(value));
    }

    /// Reads `[start, end)` of a series and checks it against the model.
    ///
    /// # Errors
    ///
    /// Returns the codec error if a bound lies outside the key window or a
    /// stored entry fails to decode.
    ///
    /// # Panics
    ///
    /// Panics if the store returns different samples than the model expects.
    pub fn read_and_verify(&self, name: &[u8], start: u64, end: u64) -> CodecResult<Vec<Sample>> {
        let actual = load_series(&self.store, name, start, end)?;
        let expected: Vec<(u64, f64)> = if start < end {
            self.expected
                .range((name.to_vec(), start)..(name.to_vec(), end))
                .map(|((_, t), v)| (*t, *v))
                .collect()
        } else {
            Vec::new()
        };
        let got: Vec<(u64, f64)> = actual.iter().map(|s| (s.timestamp, s.value)).collect();
        assert_eq!(got, expected, "series {:?} mismatch", String::from_utf8_lossy(name));
        Ok(actual)
    }

    /// Number of samples written so far.
    pub fn sample_count(&self) -> usize {
        self.expected.len()
    }
}

/// The value a sample reads back as after the fixed-point round trip.
pub fn rounded(value: f64) -> f64 {
    decode_value(encode_value(value).as_bytes()).unwrap_or(f64::NAN)
}
