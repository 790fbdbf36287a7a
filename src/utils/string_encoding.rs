// src/utils/string_encoding.rs
use crate::error::{UdfError, Result};

/// Malformed sequences become U+FFFD
pub fn decode_utf8_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Lone surrogates become U+FFFD
pub fn decode_utf16_lossy(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Values that are not a `char` are rejected
pub fn decode_utf32(code_points: &[u32]) -> Result<String> {
    code_points
        .iter()
        .map(|&cp| {
            char::from_u32(cp)
                .ok_or_else(|| UdfError::InvalidText(format!("invalid code point {:#x}", cp)))
        })
        .collect()
}
