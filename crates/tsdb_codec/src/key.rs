//! Store key layout.
//!
//! Every key starts with one namespace discriminant byte. Names are embedded
//! as raw, unescaped bytes, so decoders split by position only: a series data
//! key is always read as `discriminant | name | last TIMESTAMP_WIDTH bytes`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CodecError, CodecResult};
use crate::format::TIMESTAMP_WIDTH;
use crate::timestamp::{decode_timestamp, encode_timestamp_into};

/// Namespace discriminant, the first byte of every encoded key.
///
/// ## Discriminant values
///
/// These values are part of the on-disk format and MUST NOT change:
/// - SeriesName = `'1'`
/// - SeriesSample = `'2'`
/// - HashName = `'3'`
/// - HashKey = `'4'`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Namespace {
    /// Series name registry.
    SeriesName = b'1',
    /// Series data points keyed by name and timestamp.
    SeriesSample = b'2',
    /// Hash-table name registry.
    HashName = b'3',
    /// Hash-table keys.
    HashKey = b'4',
}

impl Namespace {
    /// All namespaces in key order.
    pub const ALL: [Namespace; 4] = [
        Namespace::SeriesName,
        Namespace::SeriesSample,
        Namespace::HashName,
        Namespace::HashKey,
    ];

    /// Convert to the discriminant byte.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Look up the namespace for a discriminant byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'1' => Some(Namespace::SeriesName),
            b'2' => Some(Namespace::SeriesSample),
            b'3' => Some(Namespace::HashName),
            b'4' => Some(Namespace::HashKey),
            _ => None,
        }
    }

    /// Short name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::SeriesName => "series_name",
            Namespace::SeriesSample => "series_sample",
            Namespace::HashName => "hash_name",
            Namespace::HashKey => "hash_key",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn prefixed(namespace: Namespace, body: &[u8], extra: usize) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + body.len() + extra);
    key.push(namespace.as_byte());
    key.extend_from_slice(body);
    key
}

/// Encode the data key of one sample: `'2' | name | timestamp field`.
///
/// `timestamp` must lie inside [`crate::timestamp_window`]; see
/// [`crate::encode_timestamp`] for what happens otherwise.
pub fn encode_series_key(name: &[u8], timestamp: u64) -> Vec<u8> {
    let mut key = prefixed(Namespace::SeriesSample, name, TIMESTAMP_WIDTH);
    encode_timestamp_into(&mut key, timestamp);
    key
}

/// Decode a series data key into its name and timestamp.
///
/// The last [`TIMESTAMP_WIDTH`] bytes are always the timestamp, whatever the
/// name contains. The discriminant byte is skipped without being checked;
/// use [`Key::decode`] to dispatch on it. A key of exactly
/// `TIMESTAMP_WIDTH + 1` bytes yields an empty name.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSeriesKey`] if the key is not longer than the
/// timestamp field, or [`CodecError::SeriesKeyTimestamp`] wrapping the
/// timestamp failure.
pub fn decode_series_key(key: &[u8]) -> CodecResult<(&[u8], u64)> {
    if key.len() <= TIMESTAMP_WIDTH {
        return Err(CodecError::InvalidSeriesKey { len: key.len() });
    }
    let split = key.len() - TIMESTAMP_WIDTH;
    let timestamp = decode_timestamp(&key[split..]).map_err(CodecError::series_key_timestamp)?;
    Ok((&key[1..split], timestamp))
}

/// Encode the registry key of a series: `'1' | name`.
pub fn encode_series_name(name: &[u8]) -> Vec<u8> {
    prefixed(Namespace::SeriesName, name, 0)
}

/// Decode a series registry key back to the name.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSeriesName`] if the key has no name bytes.
pub fn decode_series_name(key: &[u8]) -> CodecResult<&[u8]> {
    if key.len() < 2 {
        return Err(CodecError::InvalidSeriesName { len: key.len() });
    }
    Ok(&key[1..])
}

/// Encode the registry key of a hash table: `'3' | name`.
pub fn encode_hash_name(name: &[u8]) -> Vec<u8> {
    prefixed(Namespace::HashName, name, 0)
}

/// Decode a hash-table registry key back to the name.
///
/// # Errors
///
/// Returns [`CodecError::InvalidHashName`] if the key has no name bytes.
pub fn decode_hash_name(key: &[u8]) -> CodecResult<&[u8]> {
    if key.len() < 2 {
        return Err(CodecError::InvalidHashName { len: key.len() });
    }
    Ok(&key[1..])
}

/// Encode a hash-table key record: `'4' | key`.
pub fn encode_hash_key(hash_key: &[u8]) -> Vec<u8> {
    prefixed(Namespace::HashKey, hash_key, 0)
}

/// Decode a hash-table key record.
///
/// # Errors
///
/// Returns [`CodecError::InvalidHashKey`] if the record has no key bytes.
pub fn decode_hash_key(key: &[u8]) -> CodecResult<&[u8]> {
    if key.len() < 2 {
        return Err(CodecError::InvalidHashKey { len: key.len() });
    }
    Ok(&key[1..])
}

/// A decoded store key, one variant per namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Series registry entry.
    SeriesName(Vec<u8>),
    /// Data point key of a series.
    SeriesSample {
        /// Series name.
        name: Vec<u8>,
        /// Timestamp in seconds.
        timestamp: u64,
    },
    /// Hash-table registry entry.
    HashName(Vec<u8>),
    /// Hash-table key record.
    HashKey(Vec<u8>),
}

impl Key {
    /// The namespace this key lives in.
    pub fn namespace(&self) -> Namespace {
        match self {
            Key::SeriesName(_) => Namespace::SeriesName,
            Key::SeriesSample { .. } => Namespace::SeriesSample,
            Key::HashName(_) => Namespace::HashName,
            Key::HashKey(_) => Namespace::HashKey,
        }
    }

    /// Encode into store key bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Key::SeriesName(name) => encode_series_name(name),
            Key::SeriesSample { name, timestamp } => encode_series_key(name, *timestamp),
            Key::HashName(name) => encode_hash_name(name),
            Key::HashKey(key) => encode_hash_key(key),
        }
    }

    /// Decode store key bytes, dispatching on the discriminant byte.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyKey`], [`CodecError::UnknownNamespace`], or
    /// the namespace decoder's error.
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let result = Self::decode_inner(bytes);
        if let Err(error) = &result {
            tracing::debug!(
                namespace = bytes.first().copied().and_then(Namespace::from_byte).map(Namespace::as_str),
                len = bytes.len(),
                %error,
                "rejecting corrupted key"
            );
        }
        result
    }

    fn decode_inner(bytes: &[u8]) -> CodecResult<Self> {
        let &byte = bytes.first().ok_or(CodecError::EmptyKey)?;
        let namespace = Namespace::from_byte(byte).ok_or(CodecError::UnknownNamespace { byte })?;

        match namespace {
            Namespace::SeriesName => decode_series_name(bytes).map(|n| Key::SeriesName(n.to_vec())),
            Namespace::SeriesSample => {
                let (name, timestamp) = decode_series_key(bytes)?;
                Ok(Key::SeriesSample {
                    name: name.to_vec(),
                    timestamp,
                })
            }
            Namespace::HashName => decode_hash_name(bytes).map(|n| Key::HashName(n.to_vec())),
            Namespace::HashKey => decode_hash_key(bytes).map(|k| Key::HashKey(k.to_vec())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{HORIZON, MAX_TIMESTAMP};

    #[test]
    fn series_key_at_horizon() {
        let key = encode_series_key(b"cpu.load", 1_449_308_016);
        assert_eq!(key, b"2cpu.load0000000");

        let (name, timestamp) = decode_series_key(&key).unwrap();
        assert_eq!(name, b"cpu.load");
        assert_eq!(timestamp, 1_449_308_016);
    }

    #[test]
    fn series_key_roundtrip() {
        let cases: [(&[u8], u64); 4] = [
            (b"a", HORIZON + 1),
            (b"host-1.mem.free", HORIZON + 123_456_789),
            (b"0000000", HORIZON + 42),
            (b"\x00\xff", MAX_TIMESTAMP),
        ];
        for (name, timestamp) in cases {
            let key = encode_series_key(name, timestamp);
            assert_eq!(key.len(), 1 + name.len() + TIMESTAMP_WIDTH);
            assert_eq!(decode_series_key(&key).unwrap(), (name, timestamp));
        }
    }

    #[test]
    fn series_key_too_short() {
        assert_eq!(
            decode_series_key(b""),
            Err(CodecError::InvalidSeriesKey { len: 0 })
        );
        for len in 1..=TIMESTAMP_WIDTH {
            let key = vec![b'2'; len];
            assert_eq!(
                decode_series_key(&key),
                Err(CodecError::InvalidSeriesKey { len })
            );
        }
    }

    #[test]
    fn series_key_with_only_timestamp_has_empty_name() {
        let (name, timestamp) = decode_series_key(b"20000001").unwrap();
        assert!(name.is_empty());
        assert_eq!(timestamp, HORIZON + 1);
    }

    #[test]
    fn series_key_bad_timestamp_is_wrapped() {
        let err = decode_series_key(b"2cpu!!!!!!!").unwrap_err();
        assert!(matches!(
            err,
            CodecError::SeriesKeyTimestamp { ref source }
                if matches!(**source, CodecError::TimestampDigit { byte: b'!', .. })
        ));
    }

    #[test]
    fn split_is_by_length_not_content() {
        // The name ends in something that looks like a timestamp field.
        let key = encode_series_key(b"cpu0000001", HORIZON + 2);
        let (name, timestamp) = decode_series_key(&key).unwrap();
        assert_eq!(name, b"cpu0000001");
        assert_eq!(timestamp, HORIZON + 2);
    }

    #[test]
    fn series_key_ordering_follows_timestamp() {
        let timestamps = [HORIZON, HORIZON + 9, HORIZON + 10, HORIZON + 36, HORIZON + 3600];
        let keys: Vec<_> = timestamps
            .iter()
            .map(|&t| encode_series_key(b"disk.io", t))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn series_name_roundtrip() {
        let key = encode_series_name(b"cpu.load");
        assert_eq!(key, b"1cpu.load");
        assert_eq!(decode_series_name(&key).unwrap(), b"cpu.load");
    }

    #[test]
    fn series_name_too_short() {
        assert_eq!(
            decode_series_name(b""),
            Err(CodecError::InvalidSeriesName { len: 0 })
        );
        assert_eq!(
            decode_series_name(b"1"),
            Err(CodecError::InvalidSeriesName { len: 1 })
        );
    }

    #[test]
    fn hash_layout() {
        assert_eq!(encode_hash_name(b"users"), b"3users");
        assert_eq!(encode_hash_key(b"alice"), b"4alice");
        assert_eq!(decode_hash_name(b"3users").unwrap(), b"users");
        assert_eq!(decode_hash_key(b"4alice").unwrap(), b"alice");
        assert_eq!(
            decode_hash_name(b"3"),
            Err(CodecError::InvalidHashName { len: 1 })
        );
        assert_eq!(
            decode_hash_key(b""),
            Err(CodecError::InvalidHashKey { len: 0 })
        );
    }

    #[test]
    fn namespace_bytes() {
        for ns in Namespace::ALL {
            assert_eq!(Namespace::from_byte(ns.as_byte()), Some(ns));
        }
        assert_eq!(Namespace::from_byte(b'0'), None);
        assert_eq!(Namespace::from_byte(b'5'), None);
        assert_eq!(Namespace::SeriesSample.to_string(), "series_sample");
    }

    #[test]
    fn namespaces_are_disjoint() {
        let keys = [
            Key::SeriesName(b"x".to_vec()),
            Key::SeriesSample {
                name: b"x".to_vec(),
                timestamp: HORIZON,
            },
            Key::HashName(b"x".to_vec()),
            Key::HashKey(b"x".to_vec()),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                let (ea, eb) = (a.encode(), b.encode());
                assert_ne!(ea, eb);
                assert_ne!(ea[0], eb[0]);
            }
        }
    }

    #[test]
    fn key_dispatch_roundtrip() {
        let keys = [
            Key::SeriesName(b"mem".to_vec()),
            Key::SeriesSample {
                name: b"mem".to_vec(),
                timestamp: HORIZON + 77,
            },
            Key::HashName(b"sessions".to_vec()),
            Key::HashKey(b"token-1".to_vec()),
        ];
        for key in keys {
            let bytes = key.encode();
            assert_eq!(bytes[0], key.namespace().as_byte());
            assert_eq!(Key::decode(&bytes).unwrap(), key);
        }
    }

    #[test]
    fn key_decode_rejects_unknown_prefix() {
        assert_eq!(Key::decode(b""), Err(CodecError::EmptyKey));
        assert_eq!(
            Key::decode(b"9abc"),
            Err(CodecError::UnknownNamespace { byte: b'9' })
        );
        assert_eq!(
            Key::decode(b"1"),
            Err(CodecError::InvalidSeriesName { len: 1 })
        );
        assert!(matches!(
            Key::decode(b"2short"),
            Err(CodecError::InvalidSeriesKey { len: 6 })
        ));
    }
}
