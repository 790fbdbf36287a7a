// src/header/file_offset.rs
use crate::error::{UdfError, Result};
use std::fmt;
use std::str::FromStr;

/// Absolute byte range inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileOffset {
    pub offset: u64,
    pub size: u64,
}

impl FileOffset {
    pub const NULL: FileOffset = FileOffset { offset: 0, size: 0 };

    pub const fn new(offset: u64, size: u64) -> Self {
        FileOffset { offset, size }
    }

    pub const fn is_null(&self) -> bool {
        self.offset == 0 && self.size == 0
    }

    /// Both offset and size are 16-byte aligned
    pub const fn is_aligned(&self) -> bool {
        self.offset & 0xF == 0 && self.size & 0xF == 0
    }

    /// Exclusive end of the range, `None` on overflow
    pub fn end(&self) -> Option<u64> {
        self.offset.checked_add(self.size)
    }
}

impl fmt::Display for FileOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}:{:#x}", self.offset, self.size)
    }
}

impl FromStr for FileOffset {
    type Err = UdfError;

    /// Parse `<offset>:<size>`, each part decimal or `0x`-prefixed hex.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || UdfError::InvalidFileOffsetString(s.to_string());
        let (offset, size) = s.split_once(':').ok_or_else(invalid)?;
        let offset = parse_u64(offset).ok_or_else(invalid)?;
        let size = parse_u64(size).ok_or_else(invalid)?;
        Ok(FileOffset { offset, size })
    }
}

fn parse_u64(src: &str) -> Option<u64> {
    match src.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => src.parse().ok(),
    }
}
