//! Error types for the key codec.

use crate::key::Namespace;
use std::num::ParseFloatError;
use std::str::Utf8Error;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding keys and values.
///
/// Every decode-side variant means the bytes read back from the store do not
/// have the expected shape. Callers should treat all of them as one
/// classification, see [`CodecError::is_corruption`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Timestamp field does not have the fixed width.
    #[error("invalid timestamp string: expected {expected} characters, got {actual}")]
    TimestampLength {
        /// The fixed field width.
        expected: usize,
        /// Length of the rejected input.
        actual: usize,
    },

    /// Timestamp field contains a byte outside the numeral alphabet.
    #[error("invalid timestamp string: byte {byte:#04x} at position {position} is not a base-36 digit")]
    TimestampDigit {
        /// The offending byte.
        byte: u8,
        /// Its position inside the timestamp field.
        position: usize,
    },

    /// Series data key is too short to hold a discriminant and a timestamp.
    #[error("invalid series key: {len} bytes")]
    InvalidSeriesKey {
        /// Length of the rejected key.
        len: usize,
    },

    /// Series data key has a malformed timestamp tail.
    #[error("invalid series key: {source}")]
    SeriesKeyTimestamp {
        /// The timestamp codec failure.
        #[source]
        source: Box<CodecError>,
    },

    /// Series name key is shorter than discriminant plus one byte.
    #[error("invalid series name: {len} bytes")]
    InvalidSeriesName {
        /// Length of the rejected key.
        len: usize,
    },

    /// Hash-table name key is shorter than discriminant plus one byte.
    #[error("invalid hash name: {len} bytes")]
    InvalidHashName {
        /// Length of the rejected key.
        len: usize,
    },

    /// Hash-table key record is shorter than discriminant plus one byte.
    #[error("invalid hash key: {len} bytes")]
    InvalidHashKey {
        /// Length of the rejected key.
        len: usize,
    },

    /// Sample value bytes are not UTF-8.
    #[error("invalid series value: {source}")]
    ValueNotUtf8 {
        /// The UTF-8 validation failure.
        #[source]
        source: Utf8Error,
    },

    /// Sample value is not a floating-point numeral.
    #[error("invalid series value {text:?}: {source}")]
    InvalidValue {
        /// The rejected text.
        text: String,
        /// The float parser failure.
        #[source]
        source: ParseFloatError,
    },

    /// Sample value is a numeral too large for `f64`.
    #[error("invalid series value {text:?}: out of range")]
    ValueOutOfRange {
        /// The rejected text.
        text: String,
    },

    /// Key is empty, so it has no discriminant.
    #[error("empty key")]
    EmptyKey,

    /// Key starts with a byte that is not a known discriminant.
    #[error("unknown namespace discriminant {byte:#04x}")]
    UnknownNamespace {
        /// The leading byte.
        byte: u8,
    },

    /// Key belongs to a different namespace than the caller asked for.
    #[error("expected {expected} key, found {actual} key")]
    UnexpectedNamespace {
        /// Namespace the caller expected.
        expected: Namespace,
        /// Namespace the key carries.
        actual: Namespace,
    },

    /// Timestamp lies outside the representable window.
    #[error("timestamp {timestamp} outside representable window [{min}, {max}]")]
    TimestampOutOfRange {
        /// The rejected timestamp.
        timestamp: u64,
        /// Smallest representable timestamp.
        min: u64,
        /// Largest representable timestamp.
        max: u64,
    },
}

impl CodecError {
    /// Returns true if the error reports structurally invalid stored bytes.
    ///
    /// Only the guarded encoder's [`CodecError::TimestampOutOfRange`] is not a
    /// corruption; it reports a caller precondition violation instead.
    pub fn is_corruption(&self) -> bool {
        !matches!(self, Self::TimestampOutOfRange { .. })
    }

    /// Wrap a timestamp failure found inside a series data key.
    pub fn series_key_timestamp(source: CodecError) -> Self {
        Self::SeriesKeyTimestamp {
            source: Box::new(source),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(text: impl Into<String>, source: ParseFloatError) -> Self {
        Self::InvalidValue {
            text: text.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn decode_errors_are_corruption() {
        assert!(CodecError::EmptyKey.is_corruption());
        assert!(CodecError::InvalidSeriesKey { len: 3 }.is_corruption());
        assert!(CodecError::ValueOutOfRange {
            text: "1e400".into()
        }
        .is_corruption());
        assert!(CodecError::series_key_timestamp(CodecError::TimestampLength {
            expected: 7,
            actual: 2
        })
        .is_corruption());
    }

    #[test]
    fn out_of_range_is_not_corruption() {
        let err = CodecError::TimestampOutOfRange {
            timestamp: 0,
            min: 1,
            max: 2,
        };
        assert!(!err.is_corruption());
    }

    #[test]
    fn wrapped_timestamp_error_exposes_source() {
        let inner = CodecError::TimestampDigit {
            byte: b'!',
            position: 0,
        };
        let err = CodecError::series_key_timestamp(inner.clone());
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), inner.to_string());
    }

    #[test]
    fn invalid_value_wraps_parse_error() {
        let parse_err = "abc".parse::<f64>().unwrap_err();
        let err = CodecError::invalid_value("abc", parse_err);
        assert!(err.to_string().contains("\"abc\""));
        assert!(err.source().is_some());
    }
}
