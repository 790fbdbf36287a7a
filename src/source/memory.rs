// src/source/memory.rs
use crate::error::Result;
use crate::source::{clamp_range, ByteRangeSource};
use async_trait::async_trait;
use bytes::Bytes;

/// In-memory blob. Reads are zero-copy slices of the underlying buffer.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Bytes,
}

impl MemorySource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        MemorySource { data: data.into() }
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.data
    }
}

#[async_trait]
impl ByteRangeSource for MemorySource {
    async fn read(&self, offset: u64, length: u64) -> Result<Bytes> {
        if length == 0 {
            return Ok(Bytes::new());
        }
        let (start, end) = clamp_range(offset, length, self.data.len() as u64);
        Ok(self.data.slice(start as usize..end as usize))
    }

    fn len(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_inside() {
        let source = MemorySource::new((0u8..32).collect::<Vec<_>>());
        let bytes = source.read(4, 4).await.unwrap();
        assert_eq!(&bytes[..], &[4, 5, 6, 7]);
        assert_eq!(source.len(), Some(32));
    }

    #[tokio::test]
    async fn test_read_past_end_is_short() {
        let source = MemorySource::new(vec![1u8; 10]);
        assert_eq!(source.read(8, 16).await.unwrap().len(), 2);
        assert!(source.read(64, 16).await.unwrap().is_empty());
        assert!(source.read(u64::MAX, u64::MAX).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_length() {
        let source = MemorySource::new(vec![1u8; 10]);
        assert!(source.read(3, 0).await.unwrap().is_empty());
    }
}
