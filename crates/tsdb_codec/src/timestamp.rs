//! Fixed-width base-36 timestamp field.
//!
//! A timestamp is stored as its offset from [`HORIZON`], rendered in base 36
//! and left-padded with `'0'` to [`TIMESTAMP_WIDTH`] bytes. Because every
//! field in the window has the same width, byte order equals numeric order.

use std::ops::RangeInclusive;

use crate::error::{CodecError, CodecResult};
use crate::format::{
    HORIZON, MAX_TIMESTAMP, MIN_TIMESTAMP, TIMESTAMP_DIGITS, TIMESTAMP_RADIX, TIMESTAMP_WIDTH,
};

/// Base-36 digits needed for `u64::MAX`.
const MAX_NUMERAL_LEN: usize = 13;

/// Returns the inclusive range of timestamps the field can represent.
pub fn timestamp_window() -> RangeInclusive<u64> {
    MIN_TIMESTAMP..=MAX_TIMESTAMP
}

/// Returns true if `timestamp` encodes to a field of exactly [`TIMESTAMP_WIDTH`] bytes.
pub fn is_representable(timestamp: u64) -> bool {
    timestamp_window().contains(&timestamp)
}

/// Encode a timestamp (seconds) into its fixed-width field.
///
/// The caller must keep `timestamp` inside [`timestamp_window`]. Outside the
/// window the offset is computed with wrapping arithmetic and the numeral
/// grows past [`TIMESTAMP_WIDTH`], so the result no longer sorts or decodes.
/// Use [`try_encode_timestamp`] to reject such input instead.
pub fn encode_timestamp(timestamp: u64) -> String {
    let mut buf = Vec::with_capacity(TIMESTAMP_WIDTH);
    encode_timestamp_into(&mut buf, timestamp);
    buf.into_iter().map(char::from).collect()
}

/// Encode a timestamp, failing if it lies outside [`timestamp_window`].
///
/// # Errors
///
/// Returns [`CodecError::TimestampOutOfRange`] for unrepresentable input.
pub fn try_encode_timestamp(timestamp: u64) -> CodecResult<String> {
    ensure_representable(timestamp)?;
    Ok(encode_timestamp(timestamp))
}

pub(crate) fn ensure_representable(timestamp: u64) -> CodecResult<()> {
    if is_representable(timestamp) {
        return Ok(());
    }
    tracing::debug!(timestamp, "rejecting timestamp outside key window");
    Err(CodecError::TimestampOutOfRange {
        timestamp,
        min: MIN_TIMESTAMP,
        max: MAX_TIMESTAMP,
    })
}

/// Append the encoded timestamp field to `buf`.
pub(crate) fn encode_timestamp_into(buf: &mut Vec<u8>, timestamp: u64) {
    let radix = u64::from(TIMESTAMP_RADIX);
    let mut diff = timestamp.wrapping_sub(HORIZON);
    let mut numeral = [b'0'; MAX_NUMERAL_LEN];
    let mut start = MAX_NUMERAL_LEN;

    loop {
        start -= 1;
        // Always < 36.
        numeral[start] = TIMESTAMP_DIGITS[(diff % radix) as usize];
        diff /= radix;
        if diff == 0 {
            break;
        }
    }

    let start = start.min(MAX_NUMERAL_LEN - TIMESTAMP_WIDTH);
    buf.extend_from_slice(&numeral[start..]);
}

/// Decode a fixed-width timestamp field.
///
/// Letter digits are accepted in either case.
///
/// # Errors
///
/// Returns [`CodecError::TimestampLength`] if the field is not exactly
/// [`TIMESTAMP_WIDTH`] bytes, or [`CodecError::TimestampDigit`] if a byte is
/// not a base-36 digit.
pub fn decode_timestamp(field: &[u8]) -> CodecResult<u64> {
    if field.len() != TIMESTAMP_WIDTH {
        return Err(CodecError::TimestampLength {
            expected: TIMESTAMP_WIDTH,
            actual: field.len(),
        });
    }

    let mut diff: u64 = 0;
    for (position, &byte) in field.iter().enumerate() {
        let digit = char::from(byte)
            .to_digit(TIMESTAMP_RADIX)
            .ok_or(CodecError::TimestampDigit { byte, position })?;
        // 36^7 fits comfortably in u64.
        diff = diff * u64::from(TIMESTAMP_RADIX) + u64::from(digit);
    }

    Ok(diff + HORIZON)
}
