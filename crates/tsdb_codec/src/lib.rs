//! # TSDB Codec
//!
//! Key and value layout for storing time series and hash-table records in an
//! ordered byte-keyed store.
//!
//! This crate encodes logical entities into flat store keys such that:
//! - Every key starts with a namespace discriminant byte
//! - Keys of different namespaces never collide
//! - Data keys of one series sort by ascending timestamp
//!
//! ## Key Layout
//!
//! | Namespace | Key | Value |
//! |---|---|---|
//! | Series name | `1` + name | external |
//! | Series sample | `2` + name + 7-char base-36 timestamp | `%.3f` decimal text |
//! | Hash name | `3` + name | external |
//! | Hash key | `4` + key | external |
//!
//! Timestamps are stored as their offset from [`HORIZON`], which keeps the
//! field at [`TIMESTAMP_WIDTH`] characters for roughly 2475 years.
//!
//! ## Usage
//!
//! ```
//! use tsdb_codec::{decode_series_key, encode_series_key, Key, Sample};
//!
//! let key = encode_series_key(b"cpu.load", 1_449_308_016);
//! assert_eq!(key, b"2cpu.load0000000");
//!
//! let (name, timestamp) = decode_series_key(&key).unwrap();
//! assert_eq!(name, b"cpu.load");
//! assert_eq!(timestamp, 1_449_308_016);
//!
//! let (key, value) = Sample::new("cpu.load", 1_449_308_076, 0.42).encode();
//! assert_eq!(value, b"0.420");
//! assert!(matches!(Key::decode(&key).unwrap(), Key::SeriesSample { .. }));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod format;
mod key;
mod sample;
mod scan;
mod timestamp;
mod value;

pub use error::{CodecError, CodecResult};
pub use format::{
    FORMAT_VERSION, HORIZON, MAX_TIMESTAMP, MIN_TIMESTAMP, TIMESTAMP_RADIX, TIMESTAMP_WIDTH,
    VALUE_PRECISION,
};
pub use key::{
    decode_hash_key, decode_hash_name, decode_series_key, decode_series_name, encode_hash_key,
    encode_hash_name, encode_series_key, encode_series_name, Key, Namespace,
};
pub use sample::Sample;
pub use scan::{namespace_range, series_key_prefix, series_key_range, try_series_key_range};
pub use timestamp::{
    decode_timestamp, encode_timestamp, is_representable, timestamp_window, try_encode_timestamp,
};
pub use value::{decode_value, encode_value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
