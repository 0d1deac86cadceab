//! Fuzz harnesses for the key layout.
//!
//! These targets can be driven by cargo-fuzz or any byte-stream fuzzer.

use tsdb_codec::{
    decode_timestamp, decode_value, encode_timestamp, Key, Sample, TIMESTAMP_WIDTH,
};

/// Fuzz target for key decoding.
///
/// Arbitrary bytes must either decode or return an error, never panic. A key
/// that decodes must re-encode to the same bytes, unless it is a sample key
/// whose timestamp field used uppercase digits.
pub fn fuzz_key_decode(data: &[u8]) {
    if let Ok(key) = Key::decode(data) {
        let reencoded = key.encode();
        if reencoded != data {
            assert!(
                has_uppercase_timestamp(&key, data),
                "Roundtrip mismatch for {:?}",
                data
            );
        }
    }
}

/// Returns true if `data` decoded to a sample key whose timestamp field
/// contains an uppercase digit.
fn has_uppercase_timestamp(key: &Key, data: &[u8]) -> bool {
    matches!(key, Key::SeriesSample { .. })
        && data.len() >= TIMESTAMP_WIDTH
        && data[data.len() - TIMESTAMP_WIDTH..]
            .iter()
            .any(u8::is_ascii_uppercase)
}

/// Fuzz target for sample decoding.
///
/// The first byte selects where the input splits into key and value.
pub fn fuzz_sample_decode(data: &[u8]) {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = usize::from(split).min(rest.len());
    let (key, value) = rest.split_at(split);
    let _ = Sample::decode(key, value);
}

/// Fuzz target for timestamp and value fields.
pub fn fuzz_fields(data: &[u8]) {
    if let Ok(timestamp) = decode_timestamp(data) {
        assert_eq!(
            encode_timestamp(timestamp),
            String::from_utf8_lossy(data).to_ascii_lowercase()
        );
    }
    let _ = decode_value(data);
}

/// Corrupts a key by flipping one byte, for corruption-detection tests.
pub fn flip_byte(key: &[u8], index: usize, mask: u8) -> Vec<u8> {
    let mut corrupted = key.to_vec();
    if let Some(byte) = corrupted.get_mut(index) {
        *byte ^= mask;
    }
    corrupted
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsdb_codec::{encode_series_key, CodecError, HORIZON};

    #[test]
    fn fuzz_targets_accept_edge_inputs() {
        let inputs: [&[u8]; 8] = [
            b"",
            b"1",
            b"2",
            b"20000000",
            b"2cpu0001UO0",
            b"\xff\xff\xff",
            b"9",
            b"inf",
        ];
        for input in inputs {
            fuzz_key_decode(input);
            fuzz_sample_decode(input);
            fuzz_fields(input);
        }
    }

    #[test]
    fn uppercase_only_excused_in_timestamp_field() {
        let sample = Key::decode(b"2cpu0001UO0").unwrap();
        assert!(has_uppercase_timestamp(&sample, b"2cpu0001UO0"));

        let upper_name = Key::decode(b"2CPU0001uo0").unwrap();
        assert!(!has_uppercase_timestamp(&upper_name, b"2CPU0001uo0"));

        let hash_key = Key::HashKey(b"TOKEN".to_vec());
        assert!(!has_uppercase_timestamp(&hash_key, b"4TOKENX"));
    }

    #[test]
    fn uppercase_names_roundtrip_exactly() {
        let inputs: [&[u8]; 4] = [b"2CPU0000001", b"1CPU", b"3Sessions", b"4TOKEN"];
        for input in inputs {
            let key = Key::decode(input).unwrap();
            assert_eq!(key.encode(), input);
            fuzz_key_decode(input);
        }
    }

    #[test]
    fn flipped_timestamp_byte_is_detected() {
        let key = encode_series_key(b"cpu", HORIZON);
        // '0' ^ 0x10 == ' '
        let corrupted = flip_byte(&key, key.len() - 1, 0x10);
        assert!(matches!(
            Key::decode(&corrupted),
            Err(CodecError::SeriesKeyTimestamp { .. })
        ));
    }

    #[test]
    fn flipped_prefix_byte_is_detected() {
        let key = encode_series_key(b"cpu", HORIZON);
        // '2' ^ 0x08 == ':'
        let corrupted = flip_byte(&key, 0, 0x08);
        assert_eq!(
            Key::decode(&corrupted),
            Err(CodecError::UnknownNamespace { byte: b':' })
        );
    }

    #[test]
    fn flip_out_of_bounds_is_noop() {
        assert_eq!(flip_byte(b"abc", 10, 0xff), b"abc");
    }
}
