// src/source/file.rs
use crate::error::Result;
use crate::source::{clamp_range, ByteRangeSource};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::Mutex;

/// Local file read through tokio.
///
/// Reads are serialized on one file handle.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: Mutex<File>,
    size: u64,
}

impl FileSource {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).await?;
        let size = file.metadata().await?.len();
        tracing::debug!(path = %path.display(), size, "opened file source");
        Ok(FileSource {
            path,
            file: Mutex::new(file),
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteRangeSource for FileSource {
    async fn read(&self, offset: u64, length: u64) -> Result<Bytes> {
        if length == 0 {
            return Ok(Bytes::new());
        }
        let (start, end) = clamp_range(offset, length, self.size);
        let mut buffer = Vec::with_capacity((end - start) as usize);

        let mut file = self.file.lock().await;
        file.seek(SeekFrom::Start(start)).await?;
        (&mut *file).take(end - start).read_to_end(&mut buffer).await?;

        Ok(Bytes::from(buffer))
    }

    fn len(&self) -> Option<u64> {
        Some(self.size)
    }
}
