//! Series data points as store key/value pairs.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};
use crate::key::{encode_series_key, Key, Namespace};
use crate::timestamp::ensure_representable;
use crate::value::{decode_value, encode_value};

/// One data point of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Series name.
    pub name: Vec<u8>,
    /// Timestamp in seconds.
    pub timestamp: u64,
    /// Sample value. Stored with three fractional digits.
    pub value: f64,
}

impl Sample {
    /// Create a new sample.
    pub fn new(name: impl Into<Vec<u8>>, timestamp: u64, value: f64) -> Self {
        Self {
            name: name.into(),
            timestamp,
            value,
        }
    }

    /// The store key for this sample.
    pub fn key(&self) -> Vec<u8> {
        encode_series_key(&self.name, self.timestamp)
    }

    /// Encode as a `(key, value)` pair for the store.
    pub fn encode(&self) -> (Vec<u8>, Vec<u8>) {
        (self.key(), encode_value(self.value).into_bytes())
    }

    /// Encode as a `(key, value)` pair, rejecting unrepresentable timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TimestampOutOfRange`] if the timestamp falls
    /// outside the key window.
    pub fn try_encode(&self) -> CodecResult<(Vec<u8>, Vec<u8>)> {
        ensure_representable(self.timestamp)?;
        Ok(self.encode())
    }

    /// Decode a sample from a stored key/value pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a well-formed series data key or the
    /// value is not a numeral.
    pub fn decode(key: &[u8], value: &[u8]) -> CodecResult<Self> {
        let (name, timestamp) = match Key::decode(key)? {
            Key::SeriesSample { name, timestamp } => (name, timestamp),
            other => {
                return Err(CodecError::UnexpectedNamespace {
                    expected: Namespace::SeriesSample,
                    actual: other.namespace(),
                })
            }
        };

        let decoded = decode_value(value).inspect_err(|error| {
            tracing::debug!(len = value.len(), %error, "rejecting corrupted sample value");
        })?;

        Ok(Self {
            name,
            timestamp,
            value: decoded,
        })
    }
}
