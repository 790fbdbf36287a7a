// src/header/mod.rs
mod dataset_header;
mod file_header;
mod file_offset;
pub(crate) mod layout;

pub use dataset_header::{DatasetHeader, DatasetStaticHeader, DatasetTable};
pub use file_header::FileHeader;
pub use file_offset::FileOffset;
