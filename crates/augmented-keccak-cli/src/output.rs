//! Output formatting utilities.

use augmented_keccak::Digest;

/// Formats a digest as JSON.
pub fn format_json(digest: &Digest) -> String {
    serde_json::to_string_pretty(digest).unwrap_or_else(|_| "{}".to_string())
}

/// Formats bytes as a JSON array of numbers.
pub fn format_bytes(bytes: &[u8]) -> String {
    serde_json::to_string(bytes).unwrap_or_else(|_| "[]".to_string())
}
