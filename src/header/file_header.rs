// src/header/file_header.rs
use crate::error::{UdfError, Result};
use crate::header::layout::{read_record, RawFileHeader};
use crate::header::FileOffset;
use crate::utils::decode_id;

/// The fixed 64-byte header at the start of every container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: [u8; 4],
    /// Display form of the file convention id
    pub id: String,
    /// Continuation offset
    pub next: u64,
    /// Location of the root dataset
    pub root: FileOffset,
}

impl FileHeader {
    pub const SIZE: usize = RawFileHeader::SIZE;
    pub const MAGIC_TAG: &'static [u8; 4] = b"UDF0";
    pub const MAGIC: u32 = u32::from_le_bytes(*Self::MAGIC_TAG);

    /// Parse and validate the header from the first bytes of a container.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(UdfError::Truncated {
                what: "file header",
                expected: Self::SIZE as u64,
                found: bytes.len() as u64,
            });
        }

        let raw = read_record::<RawFileHeader>(bytes, 0).from_le();
        if raw.magic != Self::MAGIC {
            return Err(UdfError::InvalidMagic {
                expected: Self::MAGIC,
                found: raw.magic,
            });
        }

        if let Some((index, &value)) = raw.reserved.iter().enumerate().find(|&(_, &v)| v != 0) {
            return Err(UdfError::ReservedNotZero { index, value });
        }

        Ok(FileHeader {
            magic: *Self::MAGIC_TAG,
            id: decode_id(raw.id),
            next: raw.next,
            root: FileOffset::new(raw.root_offset, raw.root_size),
        })
    }
}
