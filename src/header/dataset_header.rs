// src/header/dataset_header.rs
use crate::error::{UdfError, Result};
use crate::header::layout::{read_record, RawLookupEntry, RawStaticHeader, RawTableDesc};
use crate::header::FileOffset;
use crate::metadata::{hash, StringTable};
use crate::types::{Shape, TypeTag};
use crate::utils::decode_id;

/// The fixed 0x18-byte prefix of a dataset header.
///
/// Parsing it is enough to learn how many bytes the full header occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStaticHeader {
    pub id: String,
    pub checksum: u32,
    pub header_size: u16,
    pub descs_len: u16,
    pub lookups_len: u16,
    pub string_len: u16,
}

impl DatasetStaticHeader {
    pub const SIZE: usize = RawStaticHeader::SIZE;
    pub const CHECK: u32 = 0x7fcea59b;

    /// Validate a dataset reference before any byte of it is read.
    pub fn validate_reference(file_offset: FileOffset) -> Result<()> {
        if file_offset.size < Self::SIZE as u64
            || file_offset.size % 16 != 0
            || file_offset.offset == 0
            || file_offset.offset % 16 != 0
        {
            return Err(UdfError::InvalidFileOffset {
                offset: file_offset.offset,
                size: file_offset.size,
            });
        }
        Ok(())
    }

    /// Parse the static header and check that the declared structures fit
    /// inside a dataset of `dataset_size` bytes.
    pub fn parse(bytes: &[u8], dataset_size: u64) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(UdfError::Truncated {
                what: "dataset static header",
                expected: Self::SIZE as u64,
                found: bytes.len() as u64,
            });
        }

        let raw = read_record::<RawStaticHeader>(bytes, 0).from_le();
        if raw.check != Self::CHECK {
            return Err(UdfError::InvalidCheck {
                expected: Self::CHECK,
                found: raw.check,
            });
        }

        let header = DatasetStaticHeader {
            id: decode_id(raw.id),
            checksum: raw.checksum,
            header_size: raw.header_size,
            descs_len: raw.descs_len,
            lookups_len: raw.lookups_len,
            string_len: raw.string_len,
        };

        let header_size = header.header_size as u64;
        if header_size > dataset_size {
            return Err(UdfError::HeaderTooLarge { header_size, dataset_size });
        }

        let required = header.required_size();
        if header_size < required {
            return Err(UdfError::HeaderTooSmall { header_size, required });
        }

        if header.string_len % 8 != 0 {
            return Err(UdfError::Misaligned {
                what: "dataset string length",
                value: header.string_len as u64,
                align: 8,
            });
        }
        if header.header_size % 8 != 0 {
            return Err(UdfError::Misaligned {
                what: "dataset header size",
                value: header_size,
                align: 8,
            });
        }

        Ok(header)
    }

    /// Bytes needed by the static header, descriptors, lookups and strings
    pub fn required_size(&self) -> u64 {
        Self::SIZE as u64
            + self.descs_len as u64 * RawTableDesc::SIZE as u64
            + self.lookups_len as u64 * RawLookupEntry::SIZE as u64
            + self.string_len as u64
    }

    fn lookups_offset(&self) -> usize {
        Self::SIZE + self.descs_len as usize * RawTableDesc::SIZE
    }
}

/// Descriptor of one named datatable inside a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetTable {
    pub key_name: String,
    /// Raw hash of `key_name`
    pub key_hash: u32,
    pub type_info: TypeTag,
    /// Zero when the payload is stored uncompressed
    pub compress_info: u16,
    /// Start of the payload in 8-byte blocks after the header
    pub mem_start: u32,
    /// End of the reserved storage in 8-byte blocks after the header
    pub mem_end: u32,
    pub data_size: u32,
    pub data_shape: Shape,
    pub index_name: Option<String>,
    pub related_name: Option<String>,
    pub type_name: Option<String>,
    /// Absolute location of the payload
    pub file_offset: FileOffset,
}

impl DatasetTable {
    pub fn is_compressed(&self) -> bool {
        self.compress_info != 0
    }
}

/// A parsed dataset header with its table descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetHeader {
    pub file_offset: FileOffset,
    pub id: String,
    pub header_size: u16,
    pub tables: Vec<DatasetTable>,
}

impl DatasetHeader {
    /// Parse the full header.
    ///
    /// `bytes` starts at the dataset offset and must hold at least
    /// `header.header_size` bytes.
    pub fn parse(file_offset: FileOffset, header: &DatasetStaticHeader, bytes: &[u8]) -> Result<Self> {
        let header_size = header.header_size as usize;
        if bytes.len() < header_size {
            return Err(UdfError::Truncated {
                what: "dataset header",
                expected: header_size as u64,
                found: bytes.len() as u64,
            });
        }
        let bytes = &bytes[..header_size];

        let strings = StringTable::parse(
            bytes,
            header.lookups_offset(),
            header.lookups_len as usize,
            header.string_len as usize,
        )?;

        let data_base = file_offset
            .offset
            .checked_add(header_size as u64)
            .ok_or(UdfError::InvalidFileOffset { offset: file_offset.offset, size: file_offset.size })?;
        let mut tables = Vec::with_capacity(header.descs_len as usize);
        for index in 0..header.descs_len as usize {
            let desc = read_record::<RawTableDesc>(
                bytes,
                DatasetStaticHeader::SIZE + index * RawTableDesc::SIZE,
            )
            .from_le();

            let key_name = strings
                .resolve(desc.key_name)
                .ok_or(UdfError::MissingKeyName { index })?;
            let type_info = TypeTag::decode(desc.type_info);
            let data_shape = Shape::decode(type_info.dimension, desc.data_shape[0], desc.data_shape[1]);

            let data_offset = (desc.mem_start as u64)
                .checked_mul(8)
                .and_then(|rel| data_base.checked_add(rel))
                .ok_or_else(|| {
                    UdfError::SizeMismatch(format!("datatable {} offset overflows", key_name))
                })?;

            tracing::trace!(
                index,
                key_name = %key_name,
                type_info = %type_info,
                shape = %data_shape,
                offset = data_offset,
                size = desc.data_size,
                "parsed datatable"
            );

            tables.push(DatasetTable {
                key_name,
                key_hash: desc.key_name,
                type_info,
                compress_info: desc.compress_info,
                mem_start: desc.mem_start,
                mem_end: desc.mem_end,
                data_size: desc.data_size,
                data_shape,
                index_name: strings.resolve(desc.index_name),
                related_name: strings.resolve(desc.related_name),
                type_name: strings.resolve(desc.type_name),
                file_offset: FileOffset::new(data_offset, desc.data_size as u64),
            });
        }

        Ok(DatasetHeader {
            file_offset,
            id: header.id.clone(),
            header_size: header.header_size,
            tables,
        })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Find a table by its resolved key name
    pub fn find_table(&self, name: &str) -> Option<&DatasetTable> {
        self.tables.iter().find(|t| t.key_name == name)
    }

    /// Find a table by the raw hash of its key name
    pub fn find_table_by_hash(&self, key_hash: u32) -> Option<&DatasetTable> {
        self.tables.iter().find(|t| t.key_hash == key_hash)
    }

    /// Find a table by name, also matching tables whose name only
    /// resolved to a hex literal
    pub fn find_table_hashed(&self, name: &str) -> Option<&DatasetTable> {
        self.find_table(name).or_else(|| self.find_table_by_hash(hash(name)))
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.key_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimension, Primitive, TypeHint};

    fn static_bytes(header_size: u16, descs: u16, lookups: u16, strings: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&DatasetStaticHeader::CHECK.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(b"ds\0\0");
        bytes.extend_from_slice(&header_size.to_le_bytes());
        bytes.extend_from_slice(&descs.to_le_bytes());
        bytes.extend_from_slice(&lookups.to_le_bytes());
        bytes.extend_from_slice(&strings.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 4]);
        bytes
    }

    fn push_desc(bytes: &mut Vec<u8>, key: u32, type_info: u16, mem_start: u32, size: u32, shape: [u32; 2]) {
        bytes.extend_from_slice(&key.to_le_bytes());
        bytes.extend_from_slice(&type_info.to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&mem_start.to_le_bytes());
        bytes.extend_from_slice(&(mem_start + (size + 7) / 8).to_le_bytes());
        bytes.extend_from_slice(&size.to_le_bytes());
        bytes.extend_from_slice(&shape[0].to_le_bytes());
        bytes.extend_from_slice(&shape[1].to_le_bytes());
        bytes.extend_from_slice(&[0u8; 16]);
    }

    #[test]
    fn test_reference_validation() {
        assert!(DatasetStaticHeader::validate_reference(FileOffset::new(0x40, 0x20)).is_ok());
        for fo in [
            FileOffset::new(0, 0x20),
            FileOffset::new(0x48, 0x20),
            FileOffset::new(0x40, 0x10),
            FileOffset::new(0x40, 0x28),
        ] {
            let err = DatasetStaticHeader::validate_reference(fo).unwrap_err();
            assert!(matches!(err, UdfError::InvalidFileOffset { .. }));
        }
    }

    #[test]
    fn test_static_header_fields() {
        let bytes = static_bytes(0x48, 1, 0, 0);
        let header = DatasetStaticHeader::parse(&bytes, 0x50).unwrap();
        assert_eq!(header.id, "ds");
        assert_eq!(header.header_size, 0x48);
        assert_eq!(header.required_size(), 0x48);
    }

    #[test]
    fn test_static_header_bad_check() {
        let mut bytes = static_bytes(0x18, 0, 0, 0);
        bytes[0] ^= 0xFF;
        let err = DatasetStaticHeader::parse(&bytes, 0x20).unwrap_err();
        assert!(matches!(err, UdfError::InvalidCheck { .. }));
    }

    #[test]
    fn test_static_header_too_large() {
        let bytes = static_bytes(0x30, 0, 0, 0);
        let err = DatasetStaticHeader::parse(&bytes, 0x20).unwrap_err();
        assert!(matches!(err, UdfError::HeaderTooLarge { header_size: 0x30, dataset_size: 0x20 }));
    }

    #[test]
    fn test_static_header_too_small() {
        let bytes = static_bytes(0x40, 1, 0, 0);
        let err = DatasetStaticHeader::parse(&bytes, 0x100).unwrap_err();
        assert!(matches!(err, UdfError::HeaderTooSmall { header_size: 0x40, required: 0x48 }));
    }

    #[test]
    fn test_static_header_misaligned_strings() {
        let bytes = static_bytes(0x30, 0, 0, 4);
        let err = DatasetStaticHeader::parse(&bytes, 0x100).unwrap_err();
        assert!(matches!(err, UdfError::Misaligned { value: 4, .. }));
    }

    #[test]
    fn test_static_header_misaligned_size() {
        let bytes = static_bytes(0x4C, 1, 0, 0);
        let err = DatasetStaticHeader::parse(&bytes, 0x100).unwrap_err();
        assert!(matches!(
            err,
            UdfError::Misaligned { what: "dataset header size", value: 0x4C, align: 8 }
        ));

        // size checks come first
        let err = DatasetStaticHeader::parse(&bytes, 0x40).unwrap_err();
        assert!(matches!(err, UdfError::HeaderTooLarge { header_size: 0x4C, .. }));
        let bytes = static_bytes(0x4C, 2, 0, 0);
        let err = DatasetStaticHeader::parse(&bytes, 0x100).unwrap_err();
        assert!(matches!(err, UdfError::HeaderTooSmall { header_size: 0x4C, required: 0x78 }));
    }

    #[test]
    fn test_parse_tables() {
        let mut bytes = static_bytes(0x18 + 0x30 * 2 + 0x8 + 0x8, 2, 1, 8);
        push_desc(&mut bytes, hash("x"), 0x001A, 0, 16, [4, 0]);
        push_desc(&mut bytes, 0x1234, 0x0102, 2, 5, [0, 0]);
        bytes.extend_from_slice(&hash("x").to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(b"x\0\0\0\0\0\0\0");

        let fo = FileOffset::new(0x40, 0x100);
        let stat = DatasetStaticHeader::parse(&bytes, fo.size).unwrap();
        let header = DatasetHeader::parse(fo, &stat, &bytes).unwrap();
        assert_eq!(header.len(), 2);
        assert_eq!(header.header_size, 0x88);

        let x = header.find_table("x").unwrap();
        assert_eq!(x.type_info.primitive, Primitive::F32);
        assert_eq!(x.type_info.dimension, Dimension::D1);
        assert_eq!(x.data_shape.dims(), &[4]);
        assert_eq!(x.file_offset, FileOffset::new(0x40 + 0x88, 16));
        assert_eq!(x.index_name, None);

        // Unresolved key names fall back to hex
        let text = header.find_table_by_hash(0x1234).unwrap();
        assert_eq!(text.key_name, "0x1234");
        assert_eq!(text.type_info.hint, TypeHint::Text);
        assert!(text.data_shape.is_scalar());
        assert_eq!(text.file_offset.offset, 0x40 + 0x88 + 16);
    }

    #[test]
    fn test_null_key_name() {
        let mut bytes = static_bytes(0x48, 1, 0, 0);
        push_desc(&mut bytes, 0, 0x0002, 0, 1, [1, 0]);
        let fo = FileOffset::new(0x40, 0x50);
        let stat = DatasetStaticHeader::parse(&bytes, fo.size).unwrap();
        let err = DatasetHeader::parse(fo, &stat, &bytes).unwrap_err();
        assert!(matches!(err, UdfError::MissingKeyName { index: 0 }));
    }

    #[test]
    fn test_short_full_header() {
        let bytes = static_bytes(0x48, 1, 0, 0);
        let fo = FileOffset::new(0x40, 0x50);
        let stat = DatasetStaticHeader::parse(&bytes, fo.size).unwrap();
        let err = DatasetHeader::parse(fo, &stat, &bytes).unwrap_err();
        assert!(matches!(err, UdfError::Truncated { expected: 0x48, found: 0x18, .. }));
    }
}
