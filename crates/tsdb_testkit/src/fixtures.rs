//! Test fixtures and store helpers.
//!
//! Provides an ordered in-memory key-value store standing in for the sorted
//! substrate the key layout is designed for, plus helpers to load series
//! into it and read them back.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Range;
use tracing_subscriber::EnvFilter;
use tsdb_codec::{
    decode_series_key, decode_series_name, namespace_range, try_series_key_range, CodecResult,
    Namespace, Sample,
};

/// A byte-ordered in-memory key-value store.
///
/// Keys iterate in lexicographic byte order, like the LSM-tree and B-tree
/// backends the layout targets.
///
/// # Thread Safety
///
/// The store is `Send + Sync` and can be shared across threads.
#[derive(Debug, Default)]
pub struct OrderedStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl OrderedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn put(&self, key: Vec<u8>, value: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.write().insert(key, value)
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.read().get(key).cloned()
    }

    /// Removes `key`, returning its value.
    pub fn delete(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.write().remove(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns all entries with `start <= key < end`, in key order.
    pub fn scan_range(&self, range: Range<Vec<u8>>) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.entries
            .read()
            .range(range)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns all entries whose key starts with `prefix`, in key order.
    pub fn scan_prefix(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.entries
            .read()
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns every key in order.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.entries.read().keys().cloned().collect()
    }
}

/// Writes samples into the store, registering each series name.
pub fn store_samples(store: &OrderedStore, samples: &[Sample]) {
    for sample in samples {
        store.put(tsdb_codec::encode_series_name(&sample.name), Vec::new());
        let (key, value) = sample.encode();
        store.put(key, value);
    }
}

/// Reads the samples of `name` with `start <= timestamp < end`.
///
/// Keys of longer names that fall inside the raw key range are skipped. An
/// inverted or empty range returns no samples.
///
/// # Errors
///
/// Returns [`tsdb_codec::CodecError::TimestampOutOfRange`] if a bound lies
/// outside the key window, or the codec error of the first corrupted entry.
pub fn load_series(
    store: &OrderedStore,
    name: &[u8],
    start: u64,
    end: u64,
) -> CodecResult<Vec<Sample>> {
    let Some(range) = try_series_key_range(name, start, end)? else {
        return Ok(Vec::new());
    };
    let mut samples = Vec::new();
    for (key, value) in store.scan_range(range) {
        let (key_name, _) = decode_series_key(&key)?;
        if key_name != name {
            continue;
        }
        samples.push(Sample::decode(&key, &value)?);
    }
    Ok(samples)
}

/// Lists every registered series name in key order.
///
/// # Errors
///
/// Returns the codec error of the first corrupted registry key.
pub fn list_series(store: &OrderedStore) -> CodecResult<Vec<Vec<u8>>> {
    store
        .scan_range(namespace_range(Namespace::SeriesName))
        .iter()
        .map(|(key, _)| decode_series_name(key).map(<[u8]>::to_vec))
        .collect()
}

/// Installs a `tracing` subscriber writing to the test output.
///
/// Filtering follows `RUST_LOG`. Safe to call from every test; only the first
/// call installs the subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use tsdb_codec::HORIZON;

    /// Creates a store holding `points` samples per series, one per minute
    /// starting at the horizon.
    pub fn populated_store(series: &[&str], points: u64) -> OrderedStore {
        let store = OrderedStore::new();
        let samples: Vec<Sample> = series
            .iter()
            .flat_map(|name| {
                (0..points).map(move |i| Sample::new(*name, HORIZON + i * 60, i as f64 * 0.5))
            })
            .collect();
        store_samples(&store, &samples);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsdb_codec::{CodecError, HORIZON, MAX_TIMESTAMP};

    #[test]
    fn store_orders_keys_bytewise() {
        let store = OrderedStore::new();
        store.put(b"b".to_vec(), vec![]);
        store.put(b"a".to_vec(), vec![]);
        store.put(b"ab".to_vec(), vec![]);
        assert_eq!(store.keys(), vec![b"a".to_vec(), b"ab".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn scan_prefix_stops_at_prefix_end() {
        let store = OrderedStore::new();
        store.put(b"2cpu".to_vec(), vec![]);
        store.put(b"2cpux".to_vec(), vec![]);
        store.put(b"2cpv".to_vec(), vec![]);
        assert_eq!(store.scan_prefix(b"2cpu").len(), 2);
    }

    #[test]
    fn put_get_delete() {
        let store = OrderedStore::new();
        assert!(store.is_empty());
        assert_eq!(store.put(b"k".to_vec(), b"1".to_vec()), None);
        assert_eq!(store.put(b"k".to_vec(), b"2".to_vec()), Some(b"1".to_vec()));
        assert_eq!(store.get(b"k"), Some(b"2".to_vec()));
        assert_eq!(store.delete(b"k"), Some(b"2".to_vec()));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn populated_scenario() {
        init_test_logging();
        let store = scenarios::populated_store(&["cpu", "mem"], 10);
        // 10 samples and one registry entry per series
        assert_eq!(store.len(), 22);
        assert_eq!(list_series(&store).unwrap(), vec![b"cpu".to_vec(), b"mem".to_vec()]);
        let cpu = load_series(&store, b"cpu", HORIZON, HORIZON + 600).unwrap();
        assert_eq!(cpu.len(), 10);
    }

    #[test]
    fn inverted_range_loads_nothing() {
        let store = scenarios::populated_store(&["cpu"], 10);
        assert!(load_series(&store, b"cpu", HORIZON + 10, HORIZON).unwrap().is_empty());
        assert!(load_series(&store, b"cpu", HORIZON, HORIZON).unwrap().is_empty());
    }

    #[test]
    fn out_of_window_bounds_are_rejected() {
        let store = scenarios::populated_store(&["cpu"], 10);
        let err = load_series(&store, b"cpu", HORIZON - 1, HORIZON + 600).unwrap_err();
        assert!(matches!(err, CodecError::TimestampOutOfRange { .. }));
        assert!(!err.is_corruption());
        assert!(load_series(&store, b"cpu", HORIZON, MAX_TIMESTAMP + 1).is_err());
    }
}
