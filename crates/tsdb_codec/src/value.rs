//! Sample value encoding.
//!
//! Values are stored as fixed-point decimal text with [`VALUE_PRECISION`]
//! fractional digits. The format is lossy: decoding returns the rounded value,
//! not the original bits.

use crate::error::{CodecError, CodecResult};
use crate::format::VALUE_PRECISION;

/// Encode a sample value as fixed-point decimal text.
///
/// Never uses scientific notation. Non-finite values render as `NaN`,
/// `inf` and `-inf`, which [`decode_value`] accepts.
pub fn encode_value(value: f64) -> String {
    format!("{:.*}", VALUE_PRECISION, value)
}

/// Decode a sample value from the bytes stored under a series key.
///
/// # Errors
///
/// Returns [`CodecError::ValueNotUtf8`] or [`CodecError::InvalidValue`] if the
/// bytes are not a floating-point numeral, and [`CodecError::ValueOutOfRange`]
/// if a finite numeral overflows `f64`.
pub fn decode_value(bytes: &[u8]) -> CodecResult<f64> {
    let text = std::str::from_utf8(bytes).map_err(|source| CodecError::ValueNotUtf8 { source })?;
    let value = text
        .parse::<f64>()
        .map_err(|source| CodecError::invalid_value(text, source))?;
    if value.is_infinite() && !is_infinity_literal(text) {
        return Err(CodecError::ValueOutOfRange { text: text.into() });
    }
    Ok(value)
}

/// `inf` or `infinity` in any case, with an optional sign.
fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_three_places() {
        assert_eq!(encode_value(3.14159), "3.142");
        assert_eq!(encode_value(2.0), "2.000");
        assert_eq!(encode_value(-0.0004), "-0.000");
        assert_eq!(encode_value(-12.5), "-12.500");
    }

    #[test]
    fn large_values_stay_fixed_point() {
        assert_eq!(encode_value(1e21), "1000000000000000000000.000");
        assert_eq!(encode_value(1e-7), "0.000");
    }

    #[test]
    fn decodes_encoded_text() {
        assert_eq!(decode_value(b"3.142").unwrap(), 3.142);
        assert_eq!(decode_value(b"-12.500").unwrap(), -12.5);
        assert_eq!(decode_value(b"42").unwrap(), 42.0);
    }

    #[test]
    fn non_finite_values_survive() {
        assert_eq!(encode_value(f64::INFINITY), "inf");
        assert_eq!(
            decode_value(encode_value(f64::NEG_INFINITY).as_bytes()).unwrap(),
            f64::NEG_INFINITY
        );
        assert!(decode_value(encode_value(f64::NAN).as_bytes())
            .unwrap()
            .is_nan());
    }

    #[test]
    fn rejects_non_numeral() {
        let err = decode_value(b"twelve").unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { ref text, .. } if text == "twelve"));
        assert!(err.is_corruption());
        assert!(decode_value(b"").is_err());
        assert!(decode_value(b"1.0.0").is_err());
    }

    #[test]
    fn rejects_overflowing_numerals() {
        for text in ["1e400", "-1e400", "+1e309"] {
            let err = decode_value(text.as_bytes()).unwrap_err();
            assert!(matches!(err, CodecError::ValueOutOfRange { text: ref t } if t == text));
            assert!(err.is_corruption());
        }
        assert_eq!(decode_value(b"inf").unwrap(), f64::INFINITY);
        assert_eq!(decode_value(b"-Infinity").unwrap(), f64::NEG_INFINITY);
        assert_eq!(decode_value(b"+INF").unwrap(), f64::INFINITY);
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = decode_value(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, CodecError::ValueNotUtf8 { .. }));
    }
}
