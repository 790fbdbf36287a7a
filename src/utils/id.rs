// src/utils/id.rs

/// Placeholder shown for a zero id
pub const EMPTY_ID: &str = "{empty}";

/// Decode a packed 4-byte id into its display string.
///
/// Bytes are taken low byte first and decoding stops once every remaining
/// higher byte is zero. Each byte maps to the Latin-1 character of the same
/// value.
pub fn decode_id(id: u32) -> String {
    if id == 0 {
        return EMPTY_ID.to_string();
    }
    let mut result = String::with_capacity(4);
    let mut rest = id;
    loop {
        result.push(char::from((rest & 0xFF) as u8));
        rest >>= 8;
        if rest == 0 {
            break;
        }
    }
    result
}
