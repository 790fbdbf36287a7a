// src/source/mmap.rs
use crate::error::Result;
use crate::source::{clamp_range, ByteRangeSource};
use async_trait::async_trait;
use bytes::Bytes;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Memory-mapped local file.
pub struct MmapSource {
    mmap: Mmap,
}

impl MmapSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        // The mapping is read-only; the file must not be truncated while mapped
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(MmapSource { mmap })
    }
}

#[async_trait]
impl ByteRangeSource for MmapSource {
    async fn read(&self, offset: u64, length: u64) -> Result<Bytes> {
        if length == 0 {
            return Ok(Bytes::new());
        }
        let (start, end) = clamp_range(offset, length, self.mmap.len() as u64);
        Ok(Bytes::copy_from_slice(&self.mmap[start as usize..end as usize]))
    }

    fn len(&self) -> Option<u64> {
        Some(self.mmap.len() as u64)
    }
}
