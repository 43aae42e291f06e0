//! Hexadecimal text handling and string-leaf byte conversion.
//!
//! Integer slots are manipulated as *reversed* hex text: the big-endian digits
//! of a number with their two-character groups emitted last-first. In that form
//! widening a slot is always a right-pad, whatever the width.

use crate::validation::ValueError;

/// Hex prefix recognized on string leaves (case-insensitive).
pub const HEX_PREFIX: &str = "0x";

fn validate(hex_text: &str) -> Result<(), ValueError> {
    if hex_text.len() % 2 != 0 || !hex_text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ValueError::InvalidHexString(hex_text.to_string()));
    }
    Ok(())
}

/// Parses consecutive two-digit groups, left to right, into bytes.
pub fn to_bytes(hex_text: &str) -> Result<Vec<u8>, ValueError> {
    ::hex::decode(hex_text).map_err(|_| ValueError::InvalidHexString(hex_text.to_string()))
}

/// Emits the two-digit groups of `hex_text` in reverse order.
pub fn reverse_byte_order(hex_text: &str) -> Result<String, ValueError> {
    validate(hex_text)?;
    // validated as ASCII, so byte offsets are char boundaries
    let mut reversed = String::with_capacity(hex_text.len());
    for end in (2..=hex_text.len()).rev().step_by(2) {
        reversed.push_str(&hex_text[end - 2..end]);
    }
    Ok(reversed)
}

/// Returns the text after a case-insensitive `0x`, if present.
pub fn strip_prefix(text: &str) -> Option<&str> {
    match text.get(..HEX_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(HEX_PREFIX) => Some(&text[HEX_PREFIX.len()..]),
        _ => None,
    }
}

/// Strips an optional `0x` prefix and reverses the byte order.
pub fn normalize_prefixed(hex_text: &str) -> Result<String, ValueError> {
    reverse_byte_order(strip_prefix(hex_text).unwrap_or(hex_text))
}

/// UTF-8 bytes of a string leaf, with leading and then trailing NULs removed.
pub fn text_bytes(text: &str) -> Vec<u8> {
    text.trim_start_matches('\0')
        .trim_end_matches('\0')
        .as_bytes()
        .to_vec()
}
