//! Key ranges for scans over an ordered store.
//!
//! Names are not length-prefixed, so the keys of a series named `cpu` share a
//! prefix with those of `cpu2`, and a range scan over `cpu` can also meet keys
//! of a longer name. Decode each key and compare the name before using it.

use std::ops::Range;

use crate::error::CodecResult;
use crate::key::{encode_series_key, Namespace};
use crate::timestamp::ensure_representable;

/// The half-open range holding every key of one namespace.
pub fn namespace_range(namespace: Namespace) -> Range<Vec<u8>> {
    let byte = namespace.as_byte();
    vec![byte]..vec![byte + 1]
}

/// The prefix shared by all data keys of the series `name`.
pub fn series_key_prefix(name: &[u8]) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(1 + name.len());
    prefix.push(Namespace::SeriesSample.as_byte());
    prefix.extend_from_slice(name);
    prefix
}

/// The half-open key range for samples of `name` with `start <= t < end`.
///
/// Both bounds must lie inside [`crate::timestamp_window`].
pub fn series_key_range(name: &[u8], start: u64, end: u64) -> Range<Vec<u8>> {
    encode_series_key(name, start)..encode_series_key(name, end)
}

/// Like [`series_key_range`], but checks both bounds first.
///
/// Returns `None` when `start >= end`, since the query selects nothing.
///
/// # Errors
///
/// Returns [`crate::CodecError::TimestampOutOfRange`] if either bound lies
/// outside [`crate::timestamp_window`].
pub fn try_series_key_range(
    name: &[u8],
    start: u64,
    end: u64,
) -> CodecResult<Option<Range<Vec<u8>>>> {
    ensure_representable(start)?;
    ensure_representable(end)?;
    if start >= end {
        return Ok(None);
    }
    Ok(Some(series_key_range(name, start, end)))
}
