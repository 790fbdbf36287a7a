// src/reader/text.rs
use crate::error::{UdfError, Result};
use crate::header::DatasetTable;
use crate::reader::TypedValue;
use crate::types::{Dimension, Primitive};
use crate::utils::{decode_utf16_lossy, decode_utf32, decode_utf8_lossy, read_u16_array, read_u32_array};

/// Code units of a text payload
enum CodeUnits {
    Utf8(Vec<u8>),
    Utf16(Vec<u16>),
    Utf32(Vec<u32>),
}

impl CodeUnits {
    fn from_payload(primitive: Primitive, bytes: &[u8]) -> Result<Self> {
        match primitive {
            Primitive::U8 | Primitive::I8 => Ok(CodeUnits::Utf8(bytes.to_vec())),
            Primitive::U16 => Ok(CodeUnits::Utf16(read_u16_array(bytes)?)),
            Primitive::U32 => Ok(CodeUnits::Utf32(read_u32_array(bytes)?)),
            other => Err(UdfError::TypeMismatch {
                expected: "u8, i8, u16 or u32 text".to_string(),
                found: other.to_string(),
            }),
        }
    }

    fn len(&self) -> usize {
        match self {
            CodeUnits::Utf8(units) => units.len(),
            CodeUnits::Utf16(units) => units.len(),
            CodeUnits::Utf32(units) => units.len(),
        }
    }

    fn decode(&self, start: usize, end: usize) -> Result<String> {
        match self {
            CodeUnits::Utf8(units) => Ok(decode_utf8_lossy(&units[start..end])),
            CodeUnits::Utf16(units) => Ok(decode_utf16_lossy(&units[start..end])),
            CodeUnits::Utf32(units) => decode_utf32(&units[start..end]),
        }
    }

    /// `end` moved left past trailing NUL units, not below `start`
    fn trim_nul(&self, start: usize, mut end: usize) -> usize {
        let is_nul = |i: usize| match self {
            CodeUnits::Utf8(units) => units[i] == 0,
            CodeUnits::Utf16(units) => units[i] == 0,
            CodeUnits::Utf32(units) => units[i] == 0,
        };
        while end > start && is_nul(end - 1) {
            end -= 1;
        }
        end
    }
}

/// Decode a payload carrying the text hint.
///
/// Scalars decode the whole buffer. One-dimensional tables carry a ghost
/// dimension with the fixed row width in code units; each row is trimmed of
/// trailing NULs.
pub(crate) fn decode_text(table: &DatasetTable, bytes: &[u8]) -> Result<TypedValue> {
    let units = CodeUnits::from_payload(table.type_info.primitive, bytes)?;

    match table.type_info.dimension {
        Dimension::Scalar => Ok(TypedValue::Text(units.decode(0, units.len())?)),
        Dimension::D1 => {
            let shape = table.data_shape.dims();
            if shape.len() != 2 {
                return Err(UdfError::TypeMismatch {
                    expected: "1d text shape with a row width".to_string(),
                    found: format!("shape {}", table.data_shape),
                });
            }
            let count = shape[0] as usize;
            let width = shape[1] as usize;
            let needed = count as u64 * width as u64;
            if needed > units.len() as u64 {
                return Err(UdfError::SizeMismatch(format!(
                    "text table {} needs {} code units, payload has {}",
                    table.key_name,
                    needed,
                    units.len()
                )));
            }

            let mut strings = Vec::with_capacity(count);
            for row in 0..count {
                let start = row * width;
                let end = units.trim_nul(start, start + width);
                strings.push(units.decode(start, end)?);
            }
            Ok(TypedValue::TextArray(strings))
        }
        Dimension::D2 => Err(UdfError::Unsupported("2d text tables".to_string())),
        Dimension::D3 => Err(UdfError::TypeMismatch {
            expected: "scalar or 1d text".to_string(),
            found: table.type_info.to_string(),
        }),
    }
}
