//! Key comparison and redaction helpers.

use subtle::ConstantTimeEq;

/// Compare a supplied key with the configured one in constant time.
#[must_use]
pub fn keys_match(supplied: &str, expected: &str) -> bool {
    supplied.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Redacted form of a key for logs: the first four characters followed by `***`.
#[must_use]
pub fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    if visible.len() == key.len() {
        return "***".to_string();
    }
    format!("{visible}***")
}
