// src/header/layout.rs
//! On-disk records. All fields are little-endian; use `from_le` after
//! reading a record to get native values.
use bytemuck::{Pod, Zeroable};

#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct RawFileHeader {
    pub magic: u32,
    pub id: u32,
    pub next: u64,
    pub root_offset: u64,
    pub root_size: u64,
    pub reserved: [u64; 4],
}

#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct RawStaticHeader {
    pub check: u32,
    pub checksum: u32,
    pub id: u32,
    pub header_size: u16,
    pub descs_len: u16,
    pub lookups_len: u16,
    pub string_len: u16,
    pub reserved: [u16; 2],
}

#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct RawTableDesc {
    pub key_name: u32,
    pub type_info: u16,
    pub compress_info: u16,
    pub mem_start: u32,
    pub mem_end: u32,
    pub data_size: u32,
    pub data_shape: [u32; 2],
    pub index_name: u32,
    pub related_name: u32,
    pub type_name: u32,
    pub checksum: u32,
    pub reserved: u32,
}

#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct RawLookupEntry {
    pub hash: u32,
    pub start: u16,
    pub len: u16,
}

const _: () = assert!(std::mem::size_of::<RawFileHeader>() == RawFileHeader::SIZE);
const _: () = assert!(std::mem::size_of::<RawStaticHeader>() == RawStaticHeader::SIZE);
const _: () = assert!(std::mem::size_of::<RawTableDesc>() == RawTableDesc::SIZE);
const _: () = assert!(std::mem::size_of::<RawLookupEntry>() == RawLookupEntry::SIZE);

impl RawFileHeader {
    pub const SIZE: usize = 0x40;

    pub fn from_le(self) -> Self {
        RawFileHeader {
            magic: u32::from_le(self.magic),
            id: u32::from_le(self.id),
            next: u64::from_le(self.next),
            root_offset: u64::from_le(self.root_offset),
            root_size: u64::from_le(self.root_size),
            reserved: self.reserved.map(u64::from_le),
        }
    }
}

impl RawStaticHeader {
    pub const SIZE: usize = 0x18;

    pub fn from_le(self) -> Self {
        RawStaticHeader {
            check: u32::from_le(self.check),
            checksum: u32::from_le(self.checksum),
            id: u32::from_le(self.id),
            header_size: u16::from_le(self.header_size),
            descs_len: u16::from_le(self.descs_len),
            lookups_len: u16::from_le(self.lookups_len),
            string_len: u16::from_le(self.string_len),
            reserved: self.reserved.map(u16::from_le),
        }
    }
}

impl RawTableDesc {
    pub const SIZE: usize = 0x30;

    pub fn from_le(self) -> Self {
        RawTableDesc {
            key_name: u32::from_le(self.key_name),
            type_info: u16::from_le(self.type_info),
            compress_info: u16::from_le(self.compress_info),
            mem_start: u32::from_le(self.mem_start),
            mem_end: u32::from_le(self.mem_end),
            data_size: u32::from_le(self.data_size),
            data_shape: self.data_shape.map(u32::from_le),
            index_name: u32::from_le(self.index_name),
            related_name: u32::from_le(self.related_name),
            type_name: u32::from_le(self.type_name),
            checksum: u32::from_le(self.checksum),
            reserved: u32::from_le(self.reserved),
        }
    }
}

impl RawLookupEntry {
    pub const SIZE: usize = 0x8;

    pub fn from_le(self) -> Self {
        RawLookupEntry {
            hash: u32::from_le(self.hash),
            start: u16::from_le(self.start),
            len: u16::from_le(self.len),
        }
    }
}

/// Read a record at `offset`; the caller guarantees the bytes are present
pub(crate) fn read_record<T: Pod>(bytes: &[u8], offset: usize) -> T {
    bytemuck::pod_read_unaligned(&bytes[offset..offset + std::mem::size_of::<T>()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_entry_layout() {
        let bytes = [0x78, 0x56, 0x34, 0x12, 0x10, 0x00, 0x05, 0x00];
        let entry = read_record::<RawLookupEntry>(&bytes, 0).from_le();
        assert_eq!(entry.hash, 0x12345678);
        assert_eq!(entry.start, 16);
        assert_eq!(entry.len, 5);
    }

    #[test]
    fn test_table_desc_field_offsets() {
        let mut bytes = [0u8; RawTableDesc::SIZE];
        bytes[0x04..0x06].copy_from_slice(&0x0112u16.to_le_bytes());
        bytes[0x14..0x18].copy_from_slice(&7u32.to_le_bytes());
        bytes[0x18..0x1C].copy_from_slice(&9u32.to_le_bytes());
        bytes[0x24..0x28].copy_from_slice(&0xABCDu32.to_le_bytes());
        let desc = read_record::<RawTableDesc>(&bytes, 0).from_le();
        assert_eq!(desc.type_info, 0x0112);
        assert_eq!(desc.data_shape, [7, 9]);
        assert_eq!(desc.type_name, 0xABCD);
    }
}
