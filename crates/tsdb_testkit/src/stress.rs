//! Stress tests for the key layout.
//!
//! Encoding is stateless, so many writers can encode into one shared store.
//! These helpers verify that concurrent ingest produces exactly the keys a
//! sequential run would.

use crate::fixtures::{list_series, load_series, OrderedStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tsdb_codec::{Sample, HORIZON};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    /// Logs a summary of the run.
    pub fn log_summary(&self, name: &str) {
        tracing::info!(
            run = name,
            total = self.total_ops,
            successful = self.successful_ops,
            failed = self.failed_ops,
            duration = ?self.duration,
            ops_per_second = self.ops_per_second,
            "stress run finished"
        );
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Samples written per series.
    pub points_per_series: u64,
    /// Number of concurrent writer threads; each owns its own series.
    pub threads: usize,
    /// Seconds between consecutive samples.
    pub interval: u64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            points_per_series: 2_000,
            threads: 4,
            interval: 10,
        }
    }
}

fn series_name(thread: usize) -> String {
    format!("stress.writer{thread}.value")
}

/// Writes one series per thread concurrently, then reads every series back
/// and counts samples that come back complete and in timestamp order.
pub fn stress_concurrent_ingest(store: Arc<OrderedStore>, config: &StressConfig) -> StressTestResult {
    let written = Arc::new(AtomicUsize::new(0));
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let store = Arc::clone(&store);
            let written = Arc::clone(&written);
            let config = config.clone();

            thread::spawn(move || {
                let name = series_name(t);
                // Write in reverse so the store, not insertion order, sorts.
                for i in (0..config.points_per_series).rev() {
                    let sample = Sample::new(name.as_str(), HORIZON + i * config.interval, i as f64);
                    let (key, value) = sample.encode();
                    store.put(key, value);
                    written.fetch_add(1, Ordering::Relaxed);
                }
                store.put(tsdb_codec::encode_series_name(name.as_bytes()), Vec::new());
            })
        })
        .collect();

    let mut failed = 0usize;
    for handle in handles {
        if handle.join().is_err() {
            failed += 1;
        }
    }

    let end = HORIZON + config.points_per_series * config.interval;
    let mut verified = 0usize;
    for t in 0..config.threads {
        match load_series(&store, series_name(t).as_bytes(), HORIZON, end) {
            Ok(samples) => {
                let ordered = samples.windows(2).all(|w| w[0].timestamp < w[1].timestamp);
                if ordered && samples.len() as u64 == config.points_per_series {
                    verified += samples.len();
                } else {
                    failed += 1;
                }
            }
            Err(_) => failed += 1,
        }
    }

    if !matches!(list_series(&store), Ok(names) if names.len() == config.threads) {
        failed += 1;
    }

    tracing::debug!(written = written.load(Ordering::Relaxed), verified, "ingest verified");
    StressTestResult::new(verified, failed, start.elapsed())
}
