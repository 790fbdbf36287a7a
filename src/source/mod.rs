// src/source/mod.rs
//! Byte range sources.
//!
//! The reader only ever asks a source for `length` bytes at `offset`. A
//! source may return fewer bytes when the range runs past the end of the
//! resource; it never returns more.

mod cached;
mod memory;

#[cfg(feature = "fs")]
mod file;
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "mmap")]
mod mmap;

pub use cached::CachedSource;
pub use memory::MemorySource;

#[cfg(feature = "fs")]
pub use file::FileSource;
#[cfg(feature = "http")]
pub use http::{HttpSource, HttpSourceBuilder};
#[cfg(feature = "mmap")]
pub use mmap::MmapSource;

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

#[async_trait]
pub trait ByteRangeSource: Send + Sync {
    /// Read up to `length` bytes starting at `offset`.
    ///
    /// Zero-length reads must return an empty buffer without touching the
    /// underlying resource.
    async fn read(&self, offset: u64, length: u64) -> Result<Bytes>;

    /// Total size of the resource, if known
    fn len(&self) -> Option<u64> {
        None
    }
}

#[async_trait]
impl<S: ByteRangeSource + ?Sized> ByteRangeSource for Arc<S> {
    async fn read(&self, offset: u64, length: u64) -> Result<Bytes> {
        (**self).read(offset, length).await
    }

    fn len(&self) -> Option<u64> {
        (**self).len()
    }
}

#[async_trait]
impl<S: ByteRangeSource + ?Sized> ByteRangeSource for Box<S> {
    async fn read(&self, offset: u64, length: u64) -> Result<Bytes> {
        (**self).read(offset, length).await
    }

    fn len(&self) -> Option<u64> {
        (**self).len()
    }
}

/// Clamp a requested range to a resource of `total` bytes
pub(crate) fn clamp_range(offset: u64, length: u64, total: u64) -> (u64, u64) {
    let start = offset.min(total);
    let end = offset.saturating_add(length).min(total);
    (start, end)
}
