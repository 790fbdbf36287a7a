// src/source/cached.rs
use crate::error::Result;
use crate::source::ByteRangeSource;
use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Memoizes reads of another source by exact `(offset, length)`.
///
/// Useful in front of a network source when the same headers are parsed
/// repeatedly. Failed reads are not cached.
pub struct CachedSource<S> {
    inner: S,
    cache: Mutex<HashMap<(u64, u64), Bytes>>,
}

impl<S: ByteRangeSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        CachedSource {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cached_ranges(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}

#[async_trait]
impl<S: ByteRangeSource> ByteRangeSource for CachedSource<S> {
    async fn read(&self, offset: u64, length: u64) -> Result<Bytes> {
        if length == 0 {
            return Ok(Bytes::new());
        }
        let cached = self.cache.lock().get(&(offset, length)).cloned();
        if let Some(bytes) = cached {
            return Ok(bytes);
        }
        let bytes = self.inner.read(offset, length).await?;
        self.cache.lock().insert((offset, length), bytes.clone());
        Ok(bytes)
    }

    fn len(&self) -> Option<u64> {
        self.inner.len()
    }
}
