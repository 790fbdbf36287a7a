// tests/common/mod.rs
//! Test-only builder for UDF container images.
#![allow(dead_code)]

use std::collections::BTreeMap;
use udf_rs::{hash, FileOffset};

pub const TEXT: u16 = 0x0100;
pub const JSON: u16 = 0x0200;
pub const DATASET: u16 = 0x0300;
pub const COORD: u16 = 0x0600;
pub const DIM_1D: u16 = 0x0010;
pub const DIM_2D: u16 = 0x0020;

pub const CUSTOM: u16 = 0;
pub const U8: u16 = 2;
pub const I8: u16 = 3;
pub const U16: u16 = 4;
pub const I16: u16 = 5;
pub const U32: u16 = 6;
pub const I32: u16 = 7;
pub const U64: u16 = 8;
pub const I64: u16 = 9;
pub const F32: u16 = 10;
pub const F64: u16 = 11;

#[derive(Clone)]
pub struct TableSpec {
    key: u32,
    key_name: Option<String>,
    type_info: u16,
    compress_info: u16,
    shape: [u32; 2],
    data: Vec<u8>,
    data_size: Option<u32>,
    index_name: Option<String>,
    related_name: Option<String>,
    type_name: Option<String>,
}

impl TableSpec {
    pub fn new(name: &str, type_info: u16) -> Self {
        TableSpec {
            key: hash(name),
            key_name: Some(name.to_string()),
            type_info,
            compress_info: 0,
            shape: [0, 0],
            data: Vec::new(),
            data_size: None,
            index_name: None,
            related_name: None,
            type_name: None,
        }
    }

    /// Key hash with no entry in the string table
    pub fn unnamed(key: u32, type_info: u16) -> Self {
        TableSpec { key, key_name: None, ..TableSpec::new("", type_info) }
    }

    pub fn shape(mut self, shape0: u32, shape1: u32) -> Self {
        self.shape = [shape0, shape1];
        self
    }

    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// Declare a payload size different from the stored bytes
    pub fn data_size(mut self, size: u32) -> Self {
        self.data_size = Some(size);
        self
    }

    pub fn compress(mut self, compress_info: u16) -> Self {
        self.compress_info = compress_info;
        self
    }

    pub fn index_name(mut self, name: &str) -> Self {
        self.index_name = Some(name.to_string());
        self
    }

    pub fn related_name(mut self, name: &str) -> Self {
        self.related_name = Some(name.to_string());
        self
    }

    pub fn type_name(mut self, name: &str) -> Self {
        self.type_name = Some(name.to_string());
        self
    }
}

pub struct DatasetBuilder {
    id: [u8; 4],
    tables: Vec<TableSpec>,
}

impl DatasetBuilder {
    pub fn new(id: &[u8; 4]) -> Self {
        DatasetBuilder { id: *id, tables: Vec::new() }
    }

    pub fn table(mut self, table: TableSpec) -> Self {
        self.tables.push(table);
        self
    }

    /// Serialize the dataset: static header, descriptors, lookups, strings,
    /// then 8-byte aligned storage. Padded to a multiple of 16 bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut names = BTreeMap::new();
        for table in &self.tables {
            let refs = [&table.key_name, &table.index_name, &table.related_name, &table.type_name];
            for name in refs.into_iter().flatten() {
                names.insert(hash(name), name.clone());
            }
        }

        let mut lookups = Vec::new();
        let mut strings = Vec::new();
        for (h, name) in &names {
            lookups.extend_from_slice(&h.to_le_bytes());
            lookups.extend_from_slice(&(strings.len() as u16).to_le_bytes());
            lookups.extend_from_slice(&(name.len() as u16).to_le_bytes());
            strings.extend_from_slice(name.as_bytes());
            strings.push(0);
        }
        while strings.len() % 8 != 0 {
            strings.push(0);
        }

        let header_size = 0x18 + self.tables.len() * 0x30 + lookups.len() + strings.len();

        let mut descs = Vec::new();
        let mut storage = Vec::new();
        for table in &self.tables {
            let mem_start = (storage.len() / 8) as u32;
            storage.extend_from_slice(&table.data);
            while storage.len() % 8 != 0 {
                storage.push(0);
            }
            let mem_end = (storage.len() / 8) as u32;
            let data_size = table.data_size.unwrap_or(table.data.len() as u32);
            let name_ref = |name: &Option<String>| name.as_deref().map(hash).unwrap_or(0);

            descs.extend_from_slice(&table.key.to_le_bytes());
            descs.extend_from_slice(&table.type_info.to_le_bytes());
            descs.extend_from_slice(&table.compress_info.to_le_bytes());
            descs.extend_from_slice(&mem_start.to_le_bytes());
            descs.extend_from_slice(&mem_end.to_le_bytes());
            descs.extend_from_slice(&data_size.to_le_bytes());
            descs.extend_from_slice(&table.shape[0].to_le_bytes());
            descs.extend_from_slice(&table.shape[1].to_le_bytes());
            descs.extend_from_slice(&name_ref(&table.index_name).to_le_bytes());
            descs.extend_from_slice(&name_ref(&table.related_name).to_le_bytes());
            descs.extend_from_slice(&name_ref(&table.type_name).to_le_bytes());
            descs.extend_from_slice(&[0u8; 8]);
        }

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0x7fcea59bu32.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&self.id);
        bytes.extend_from_slice(&(header_size as u16).to_le_bytes());
        bytes.extend_from_slice(&(self.tables.len() as u16).to_le_bytes());
        bytes.extend_from_slice(&((lookups.len() / 8) as u16).to_le_bytes());
        bytes.extend_from_slice(&(strings.len() as u16).to_le_bytes());
        bytes.extend_from_slice(&[0u8; 4]);
        bytes.extend_from_slice(&descs);
        bytes.extend_from_slice(&lookups);
        bytes.extend_from_slice(&strings);
        assert_eq!(bytes.len(), header_size);
        bytes.extend_from_slice(&storage);
        while bytes.len() % 16 != 0 {
            bytes.push(0);
        }
        bytes
    }
}

/// Lays out datasets after a 64-byte file header
pub struct ContainerBuilder {
    id: [u8; 4],
    bytes: Vec<u8>,
}

impl ContainerBuilder {
    pub fn new(id: &[u8; 4]) -> Self {
        ContainerBuilder { id: *id, bytes: vec![0u8; 0x40] }
    }

    pub fn add_dataset(&mut self, dataset: &DatasetBuilder) -> FileOffset {
        self.add_raw(&dataset.build())
    }

    /// Append arbitrary bytes at the next 16-byte boundary
    pub fn add_raw(&mut self, data: &[u8]) -> FileOffset {
        let offset = self.bytes.len() as u64;
        self.bytes.extend_from_slice(data);
        while self.bytes.len() % 16 != 0 {
            self.bytes.push(0);
        }
        FileOffset::new(offset, self.bytes.len() as u64 - offset)
    }

    pub fn finish(mut self, root: FileOffset) -> Vec<u8> {
        let mut header = Vec::with_capacity(0x40);
        header.extend_from_slice(b"UDF0");
        header.extend_from_slice(&self.id);
        header.extend_from_slice(&0u64.to_le_bytes());
        header.extend_from_slice(&root.offset.to_le_bytes());
        header.extend_from_slice(&root.size.to_le_bytes());
        header.resize(0x40, 0);
        self.bytes[..0x40].copy_from_slice(&header);
        self.bytes
    }
}

/// A single-dataset container and the root location
pub fn single_dataset(dataset: &DatasetBuilder) -> (Vec<u8>, FileOffset) {
    let mut container = ContainerBuilder::new(b"test");
    let root = container.add_dataset(dataset);
    (container.finish(root), root)
}

pub fn le_bytes<T: Copy, const N: usize>(values: &[T], to_le: fn(T) -> [u8; N]) -> Vec<u8> {
    values.iter().flat_map(|&v| to_le(v)).collect()
}
