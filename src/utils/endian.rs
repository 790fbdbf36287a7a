// src/utils/endian.rs
use byteorder::{ByteOrder, LittleEndian};
use crate::error::{UdfError, Result};

/// Element count of a little-endian array stored in `bytes`, or an error
/// if the byte length is not a whole number of elements
pub fn element_count(bytes: &[u8], width: usize) -> Result<usize> {
    if bytes.len() % width != 0 {
        return Err(UdfError::SizeMismatch(format!(
            "{} bytes is not a multiple of the element width {}",
            bytes.len(),
            width
        )));
    }
    Ok(bytes.len() / width)
}

macro_rules! read_le_array {
    ($name:ident, $ty:ty, $width:expr, $read_into:ident) => {
        pub fn $name(bytes: &[u8]) -> Result<Vec<$ty>> {
            let count = element_count(bytes, $width)?;
            let mut values = vec![<$ty>::default(); count];
            LittleEndian::$read_into(bytes, &mut values);
            Ok(values)
        }
    };
}

read_le_array!(read_u16_array, u16, 2, read_u16_into);
read_le_array!(read_i16_array, i16, 2, read_i16_into);
read_le_array!(read_u32_array, u32, 4, read_u32_into);
read_le_array!(read_i32_array, i32, 4, read_i32_into);
read_le_array!(read_u64_array, u64, 8, read_u64_into);
read_le_array!(read_i64_array, i64, 8, read_i64_into);
read_le_array!(read_f32_array, f32, 4, read_f32_into);
read_le_array!(read_f64_array, f64, 8, read_f64_into);

pub fn read_i8_array(bytes: &[u8]) -> Vec<i8> {
    bytes.iter().map(|&b| b as i8).collect()
}
