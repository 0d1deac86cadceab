//! Byte helpers for format verification.

/// Encodes bytes as hexadecimal string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decodes hexadecimal string to bytes.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    let hex = hex.replace([' ', '\n', '\r'], "");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}

/// Renders a key for assertion messages: printable ASCII as-is, other bytes
/// as `\xNN`.
pub fn escape_key(key: &[u8]) -> String {
    key.iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect()
}

/// Asserts that `actual` equals the expected key bytes, with readable output.
pub fn assert_key_eq(actual: &[u8], expected: &[u8]) {
    assert!(
        actual == expected,
        "key mismatch:\n  expected: {} ({})\n  actual:   {} ({})",
        escape_key(expected),
        hex_encode(expected),
        escape_key(actual),
        hex_encode(actual)
    );
}
