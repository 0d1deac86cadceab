//! # TSDB Testkit
//!
//! Test utilities for the TSDB key layout.
//!
//! This crate provides:
//! - An ordered in-memory store standing in for the sorted key-value substrate
//! - Property-based test generators using proptest
//! - Byte helpers for format verification
//! - Store-level integration harnesses
//! - Fuzz testing harnesses
//! - Concurrent ingest stress tests
//! - Cross-language key vectors
//!
//! ## Usage
//!
//! ```rust
//! use tsdb_testkit::prelude::*;
//! use tsdb_codec::HORIZON;
//!
//! let mut harness = SeriesHarness::new();
//! harness.write(b"cpu.load", HORIZON + 60, 0.25);
//! let samples = harness.read_and_verify(b"cpu.load", HORIZON, HORIZON + 120).unwrap();
//! assert_eq!(samples.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod fuzz;
pub mod generators;
pub mod golden;
pub mod integration;
pub mod stress;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::stress::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use fuzz::*;
pub use generators::*;
pub use golden::*;
pub use integration::*;
pub use stress::*;
pub use vectors::*;
