//! Cross-language test vectors for the key layout.
//!
//! Other implementations sharing the same store must produce and accept
//! exactly these bytes. [`export_json`] writes them out for those suites.

use crate::golden::{hex_decode, hex_encode};
use serde::{Deserialize, Serialize};
use tsdb_codec::{CodecError, Key, HORIZON, MAX_TIMESTAMP};

/// A key together with its expected encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// The logical key.
    pub key: Key,
    /// Expected encoded key (hex-encoded).
    pub expected_hex: String,
}

/// Malformed input that must be rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorruptionVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Input key bytes (hex-encoded).
    pub input_hex: String,
    /// Expected error kind, see [`error_kind`].
    pub expected_error: String,
}

/// A sample value with its expected stored text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Input value.
    pub value: f64,
    /// Expected stored text.
    pub expected: String,
}

/// All vectors, as exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSet {
    /// Layout version the vectors were produced for.
    pub format_version: (u16, u16),
    /// Key encoding vectors.
    pub keys: Vec<KeyVector>,
    /// Corruption vectors.
    pub corruption: Vec<CorruptionVector>,
    /// Value encoding vectors.
    pub values: Vec<ValueVector>,
}

fn key_vector(id: &str, description: &str, key: Key, expected: &[u8]) -> KeyVector {
    KeyVector {
        id: id.into(),
        description: description.into(),
        key,
        expected_hex: hex_encode(expected),
    }
}

fn corruption_vector(id: &str, description: &str, input: &[u8], kind: &str) -> CorruptionVector {
    CorruptionVector {
        id: id.into(),
        description: description.into(),
        input_hex: hex_encode(input),
        expected_error: kind.into(),
    }
}

/// Key encoding vectors.
pub fn key_vectors() -> Vec<KeyVector> {
    vec![
        key_vector(
            "series_name",
            "Series registry key",
            Key::SeriesName(b"cpu.load".to_vec()),
            b"1cpu.load",
        ),
        key_vector(
            "series_sample_horizon",
            "Sample key at the horizon",
            Key::SeriesSample {
                name: b"cpu.load".to_vec(),
                timestamp: HORIZON,
            },
            b"2cpu.load0000000",
        ),
        key_vector(
            "series_sample_one_day",
            "Sample key one day after the horizon",
            Key::SeriesSample {
                name: b"cpu.load".to_vec(),
                timestamp: HORIZON + 86_400,
            },
            b"2cpu.load0001uo0",
        ),
        key_vector(
            "series_sample_max",
            "Sample key at the last representable second",
            Key::SeriesSample {
                name: b"m".to_vec(),
                timestamp: MAX_TIMESTAMP,
            },
            b"2mzzzzzzz",
        ),
        key_vector(
            "series_sample_binary_name",
            "Name bytes are stored unescaped",
            Key::SeriesSample {
                name: vec![0x00, 0xff],
                timestamp: HORIZON + 1,
            },
            b"2\x00\xff0000001",
        ),
        key_vector(
            "hash_name",
            "Hash-table registry key",
            Key::HashName(b"sessions".to_vec()),
            b"3sessions",
        ),
        key_vector(
            "hash_key",
            "Hash-table key record",
            Key::HashKey(b"token".to_vec()),
            b"4token",
        ),
    ]
}

/// Malformed keys and the error each must produce.
pub fn corruption_vectors() -> Vec<CorruptionVector> {
    vec![
        corruption_vector("empty", "Empty key", b"", "empty_key"),
        corruption_vector("unknown_prefix", "Unknown discriminant", b"9abc", "unknown_namespace"),
        corruption_vector("series_name_bare", "Registry key without name", b"1", "invalid_series_name"),
        corruption_vector("series_key_short", "Sample key too short", b"2000000", "invalid_series_key"),
        corruption_vector(
            "series_key_bad_digit",
            "Sample key with punctuation in timestamp",
            b"2cpu!!!!!!!",
            "invalid_timestamp",
        ),
        corruption_vector("hash_name_bare", "Hash registry key without name", b"3", "invalid_hash_name"),
        corruption_vector("hash_key_bare", "Hash key record without key", b"4", "invalid_hash_key"),
    ]
}

/// Value encoding vectors.
pub fn value_vectors() -> Vec<ValueVector> {
    [
        ("pi", 3.14159, "3.142"),
        ("integer", 42.0, "42.000"),
        ("negative", -0.5, "-0.500"),
        ("tiny", 0.0001, "0.000"),
        ("large", 1e15, "1000000000000000.000"),
    ]
    .into_iter()
    .map(|(id, value, expected)| ValueVector {
        id: id.into(),
        value,
        expected: expected.into(),
    })
    .collect()
}

/// Returns the complete vector set.
pub fn vector_set() -> VectorSet {
    VectorSet {
        format_version: tsdb_codec::FORMAT_VERSION,
        keys: key_vectors(),
        corruption: corruption_vectors(),
        values: value_vectors(),
    }
}

/// Serializes the complete vector set as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&vector_set())
}

/// Short, stable name for an error, used by [`CorruptionVector`].
pub fn error_kind(error: &CodecError) -> &'static str {
    match error {
        CodecError::TimestampLength { .. }
        | CodecError::TimestampDigit { .. }
        | CodecError::SeriesKeyTimestamp { .. } => "invalid_timestamp",
        CodecError::InvalidSeriesKey { .. } => "invalid_series_key",
        CodecError::InvalidSeriesName { .. } => "invalid_series_name",
        CodecError::InvalidHashName { .. } => "invalid_hash_name",
        CodecError::InvalidHashKey { .. } => "invalid_hash_key",
        CodecError::ValueNotUtf8 { .. }
        | CodecError::InvalidValue { .. }
        | CodecError::ValueOutOfRange { .. } => "invalid_value",
        CodecError::EmptyKey => "empty_key",
        CodecError::UnknownNamespace { .. } => "unknown_namespace",
        CodecError::UnexpectedNamespace { .. } => "unexpected_namespace",
        CodecError::TimestampOutOfRange { .. } => "timestamp_out_of_range",
    }
}

/// Checks every vector against the codec, returning the ids that fail.
pub fn failing_vectors() -> Vec<String> {
    let mut failures = Vec::new();

    for vector in key_vectors() {
        let expected = hex_decode(&vector.expected_hex);
        let decoded = Key::decode(&expected);
        if vector.key.encode() != expected || decoded.as_ref() != Ok(&vector.key) {
            failures.push(vector.id);
        }
    }

    for vector in corruption_vectors() {
        match Key::decode(&hex_decode(&vector.input_hex)) {
            Err(err) if error_kind(&err) == vector.expected_error => {}
            _ => failures.push(vector.id),
        }
    }

    for vector in value_vectors() {
        if tsdb_codec::encode_value(vector.value) != vector.expected {
            failures.push(vector.id);
        }
    }

    failures
}
