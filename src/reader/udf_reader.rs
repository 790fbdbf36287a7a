// src/reader/udf_reader.rs
use crate::error::{UdfError, Result};
use crate::header::{DatasetHeader, DatasetStaticHeader, DatasetTable, FileHeader, FileOffset};
use crate::reader::TypedValue;
use crate::source::ByteRangeSource;
use bytes::{Bytes, BytesMut};

/// Reader for UDF containers over any byte range source.
///
/// Every call re-reads and re-parses what it needs; wrap the source in a
/// [`CachedSource`](crate::source::CachedSource) to avoid repeated fetches.
///
/// # Example
///
/// ```no_run
/// use udf_rs::prelude::*;
///
/// # async fn run() -> Result<()> {
/// let reader = UdfReader::new(FileSource::open("scene.udf").await?);
/// let file = reader.read_file_header().await?;
/// let root = reader.read_dataset_header(file.root).await?;
/// for table in &root.tables {
///     println!("{}: {} {}", table.key_name, table.type_info, table.data_shape);
/// }
/// # Ok(())
/// # }
/// ```
pub struct UdfReader<S> {
    source: S,
}

impl<S: ByteRangeSource> UdfReader<S> {
    pub fn new(source: S) -> Self {
        UdfReader { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Read and validate the 64-byte file header.
    pub async fn read_file_header(&self) -> Result<FileHeader> {
        let bytes = self.source.read(0, FileHeader::SIZE as u64).await?;
        let header = FileHeader::parse(&bytes)?;
        tracing::debug!(id = %header.id, root = %header.root, next = header.next, "read file header");
        Ok(header)
    }

    /// Read and validate the dataset header at `file_offset`.
    ///
    /// The static header is read first; the rest of the header is only
    /// fetched once the static header says how large it is.
    pub async fn read_dataset_header(&self, file_offset: FileOffset) -> Result<DatasetHeader> {
        DatasetStaticHeader::validate_reference(file_offset)?;

        let static_size = DatasetStaticHeader::SIZE as u64;
        let mut bytes = self.source.read(file_offset.offset, static_size).await?;
        let header = DatasetStaticHeader::parse(&bytes, file_offset.size)?;

        let header_size = header.header_size as usize;
        if bytes.len() < header_size {
            let rest = self
                .source
                .read(
                    file_offset.offset.saturating_add(bytes.len() as u64),
                    (header_size - bytes.len()) as u64,
                )
                .await?;
            let mut full = BytesMut::with_capacity(bytes.len() + rest.len());
            full.extend_from_slice(&bytes);
            full.extend_from_slice(&rest);
            bytes = full.freeze();
        }

        let dataset = DatasetHeader::parse(file_offset, &header, &bytes)?;
        tracing::debug!(
            offset = %file_offset,
            id = %dataset.id,
            header_size = dataset.header_size,
            tables = dataset.tables.len(),
            "read dataset header"
        );
        Ok(dataset)
    }

    /// Read the file header and the root dataset it points to.
    pub async fn read_root(&self) -> Result<(FileHeader, DatasetHeader)> {
        let file = self.read_file_header().await?;
        let root = self.read_dataset_header(file.root).await?;
        Ok((file, root))
    }

    /// Raw bytes of a byte range, possibly short at the end of the resource
    pub async fn read_buffer(&self, file_offset: FileOffset) -> Result<Bytes> {
        self.source.read(file_offset.offset, file_offset.size).await
    }

    /// Fetch and decode a datatable's payload.
    pub async fn read_data(&self, table: &DatasetTable) -> Result<TypedValue> {
        if table.is_compressed() {
            return Err(UdfError::Unsupported(format!(
                "decompression (compress_info {:#x})",
                table.compress_info
            )));
        }

        let mut bytes = self.read_buffer(table.file_offset).await?;
        let expected = table.data_size as u64;
        if (bytes.len() as u64) < expected {
            return Err(UdfError::Truncated {
                what: "datatable payload",
                expected,
                found: bytes.len() as u64,
            });
        }
        bytes.truncate(expected as usize);

        tracing::debug!(
            key_name = %table.key_name,
            type_info = %table.type_info,
            offset = %table.file_offset,
            "read datatable"
        );
        TypedValue::decode(table, bytes)
    }

    /// Find a table by name in `dataset` and decode it.
    ///
    /// Returns `Ok(None)` when the dataset has no such table.
    pub async fn read_table(&self, dataset: &DatasetHeader, name: &str) -> Result<Option<TypedValue>> {
        match dataset.find_table_hashed(name) {
            Some(table) => Ok(Some(self.read_data(table).await?)),
            None => Ok(None),
        }
    }

    /// Read the dataset headers referenced by a table with the dataset hint.
    pub async fn read_child_datasets(&self, table: &DatasetTable) -> Result<Vec<DatasetHeader>> {
        let value = self.read_data(table).await?;
        let offsets = value.as_file_offsets().ok_or_else(|| UdfError::TypeMismatch {
            expected: "u64 (offset, size) pairs".to_string(),
            found: value.type_name().to_string(),
        })?;

        let mut children = Vec::with_capacity(offsets.len());
        for offset in offsets {
            if offset.is_null() {
                continue;
            }
            children.push(self.read_dataset_header(offset).await?);
        }
        Ok(children)
    }
}
