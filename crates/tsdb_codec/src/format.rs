//! Persisted layout constants.
//!
//! These values are part of the on-disk key format and MUST NOT change
//! without a data migration. Bump [`FORMAT_VERSION`] alongside any change.

/// Version of the key layout described by this module, as `(major, minor)`.
pub const FORMAT_VERSION: (u16, u16) = (1, 0);

/// Epoch reference subtracted from every timestamp before encoding, in seconds.
pub const HORIZON: u64 = 1_449_308_016;

/// Radix of the timestamp numeral.
pub const TIMESTAMP_RADIX: u32 = 36;

/// Width of the encoded timestamp field in bytes.
pub const TIMESTAMP_WIDTH: usize = 7;

/// Digits used by the timestamp numeral, in ascending order.
pub const TIMESTAMP_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of distinct timestamps the fixed-width field can hold (36^7).
pub const TIMESTAMP_SPAN: u64 = 78_364_164_096;

/// Smallest representable timestamp.
pub const MIN_TIMESTAMP: u64 = HORIZON;

/// Largest representable timestamp.
pub const MAX_TIMESTAMP: u64 = HORIZON + TIMESTAMP_SPAN - 1;

/// Fractional digits kept when encoding a sample value.
pub const VALUE_PRECISION: usize = 3;
