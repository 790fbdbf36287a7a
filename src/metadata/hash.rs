// src/metadata/hash.rs

/// Name hash used for key references in dataset headers.
///
/// DJB2 with xor mixing. Usable in const context:
///
/// ```
/// const TIMESTAMP: u32 = udf_rs::hash("timestamp");
/// assert_ne!(TIMESTAMP, 0);
/// ```
pub const fn hash(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut result = 3581u32;
    let mut i = 0;
    while i < bytes.len() {
        result = result.wrapping_mul(33) ^ bytes[i] as u32;
        i += 1;
    }
    result
}
