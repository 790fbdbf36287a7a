// src/metadata/string_table.rs
use crate::error::{UdfError, Result};
use crate::header::layout::{read_record, RawLookupEntry};
use crate::utils::decode_utf8_lossy;
use std::collections::HashMap;

/// Hash to name mapping of one dataset header.
///
/// Built from the lookup entries and the string blob that follow the table
/// descriptors. Lives only as long as the header parse.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    strings: HashMap<u32, String>,
}

impl StringTable {
    /// Parse `lookups_len` entries at `lookups_offset` followed directly by
    /// a string blob of `string_len` bytes.
    pub fn parse(
        header: &[u8],
        lookups_offset: usize,
        lookups_len: usize,
        string_len: usize,
    ) -> Result<Self> {
        let blob_start = lookups_offset + lookups_len * RawLookupEntry::SIZE;
        let blob_end = blob_start + string_len;
        if header.len() < blob_end {
            return Err(UdfError::Truncated {
                what: "dataset string table",
                expected: blob_end as u64,
                found: header.len() as u64,
            });
        }
        let blob = &header[blob_start..blob_end];

        let mut strings = HashMap::with_capacity(lookups_len);
        for i in 0..lookups_len {
            let entry = read_record::<RawLookupEntry>(header, lookups_offset + i * RawLookupEntry::SIZE)
                .from_le();
            let start = entry.start as usize;
            let end = start + entry.len as usize;
            if end > string_len {
                return Err(UdfError::StringOutOfBounds {
                    start: entry.start as u32,
                    len: entry.len as u32,
                    string_len: string_len as u32,
                });
            }
            strings.insert(entry.hash, decode_utf8_lossy(&blob[start..end]));
        }

        Ok(StringTable { strings })
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn get(&self, hash: u32) -> Option<&str> {
        self.strings.get(&hash).map(String::as_str)
    }

    /// Resolve a name reference.
    ///
    /// A zero hash means the name is absent. A hash missing from the table
    /// resolves to its hex literal, e.g. `0x1f2e`.
    pub fn resolve(&self, hash: u32) -> Option<String> {
        if hash == 0 {
            return None;
        }
        match self.strings.get(&hash) {
            Some(name) => Some(name.clone()),
            None => {
                tracing::warn!(hash = format_args!("{:#x}", hash), "unresolved name hash");
                Some(format!("{:#x}", hash))
            }
        }
    }
}

impl FromIterator<(u32, String)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        StringTable { strings: iter.into_iter().collect() }
    }
}
