// src/reader/data.rs
use crate::error::{UdfError, Result};
use crate::header::{DatasetTable, FileOffset};
use crate::reader::text::decode_text;
use crate::types::{Primitive, TypeHint};
use crate::utils::*;
use bytes::Bytes;

/// Decoded contents of a datatable.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    U64(Vec<u64>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Text(String),
    TextArray(Vec<String>),
    Json(serde_json::Value),
    /// Payload with no decoding rule, returned as stored
    Raw(Bytes),
}

impl TypedValue {
    /// Decode an uncompressed payload according to the table's type tag.
    pub fn decode(table: &DatasetTable, bytes: Bytes) -> Result<Self> {
        if table.is_compressed() {
            return Err(UdfError::Unsupported(format!(
                "decompression (compress_info {:#x})",
                table.compress_info
            )));
        }

        match table.type_info.hint {
            TypeHint::Text => return decode_text(table, &bytes),
            TypeHint::Json => {
                let text = decode_utf8_lossy(&bytes);
                return Ok(TypedValue::Json(serde_json::from_str(&text)?));
            }
            _ => {}
        }

        let value = match table.type_info.primitive {
            Primitive::U8 => TypedValue::U8(bytes.to_vec()),
            Primitive::I8 => TypedValue::I8(read_i8_array(&bytes)),
            Primitive::U16 => TypedValue::U16(read_u16_array(&bytes)?),
            Primitive::I16 => TypedValue::I16(read_i16_array(&bytes)?),
            Primitive::U32 => TypedValue::U32(read_u32_array(&bytes)?),
            Primitive::I32 => TypedValue::I32(read_i32_array(&bytes)?),
            Primitive::U64 => TypedValue::U64(read_u64_array(&bytes)?),
            Primitive::I64 => TypedValue::I64(read_i64_array(&bytes)?),
            Primitive::F32 => TypedValue::F32(read_f32_array(&bytes)?),
            Primitive::F64 => TypedValue::F64(read_f64_array(&bytes)?),
            Primitive::Custom | Primitive::Unknown(_) => TypedValue::Raw(bytes),
        };
        Ok(value)
    }

    /// Number of elements, strings or bytes held
    pub fn len(&self) -> usize {
        match self {
            TypedValue::U8(v) => v.len(),
            TypedValue::I8(v) => v.len(),
            TypedValue::U16(v) => v.len(),
            TypedValue::I16(v) => v.len(),
            TypedValue::U32(v) => v.len(),
            TypedValue::I32(v) => v.len(),
            TypedValue::U64(v) => v.len(),
            TypedValue::I64(v) => v.len(),
            TypedValue::F32(v) => v.len(),
            TypedValue::F64(v) => v.len(),
            TypedValue::Text(_) | TypedValue::Json(_) => 1,
            TypedValue::TextArray(v) => v.len(),
            TypedValue::Raw(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::U8(_) => "u8[]",
            TypedValue::I8(_) => "i8[]",
            TypedValue::U16(_) => "u16[]",
            TypedValue::I16(_) => "i16[]",
            TypedValue::U32(_) => "u32[]",
            TypedValue::I32(_) => "i32[]",
            TypedValue::U64(_) => "u64[]",
            TypedValue::I64(_) => "i64[]",
            TypedValue::F32(_) => "f32[]",
            TypedValue::F64(_) => "f64[]",
            TypedValue::Text(_) => "text",
            TypedValue::TextArray(_) => "text[]",
            TypedValue::Json(_) => "json",
            TypedValue::Raw(_) => "bytes",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret a `u64` array as `(offset, size)` pairs, as stored by
    /// tables with the dataset hint
    pub fn as_file_offsets(&self) -> Option<Vec<FileOffset>> {
        match self {
            TypedValue::U64(values) if values.len() % 2 == 0 => Some(
                values
                    .chunks_exact(2)
                    .map(|pair| FileOffset::new(pair[0], pair[1]))
                    .collect(),
            ),
            _ => None,
        }
    }
}
