// src/lib.rs
//! # udf-rs
//!
//! An async reader for UDF containers: binary files holding named, typed,
//! multi-dimensional datasets with semantic type hints (text, JSON, child
//! datasets, coordinates and more).
//!
//! ## Features
//!
//! - **Strict validation**: every header field is checked against the binary
//!   layout before it is trusted
//! - **Pluggable I/O**: in-memory blobs, local files, memory maps and HTTP
//!   range requests behind one [`ByteRangeSource`] trait
//! - **Typed decoding**: numeric arrays of ten primitive kinds, text in
//!   UTF-8/16/32, string arrays and JSON
//! - **Two-phase header reads**: only the bytes a header declares are fetched
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use udf_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let reader = UdfReader::new(FileSource::open("scene.udf").await?);
//!
//!     let (file, root) = reader.read_root().await?;
//!     println!("file {} root {}", file.id, file.root);
//!
//!     for table in &root.tables {
//!         let value = reader.read_data(table).await?;
//!         println!("{} -> {} ({} items)", table.key_name, value.type_name(), value.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Reading from memory
//!
//! ```rust
//! use udf_rs::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let reader = UdfReader::new(MemorySource::new(vec![0u8; 16]));
//! let err = reader.read_file_header().await.unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Truncated);
//! # }
//! ```

// Modules
pub mod display;
pub mod error;
pub mod header;
pub mod metadata;
pub mod reader;
pub mod source;
pub mod types;

mod utils;

// Re-export commonly used types at the crate root for convenience
pub use error::{ErrorKind, Result, UdfError};

pub use types::{Dimension, Primitive, Shape, TypeHint, TypeTag};

pub use header::{DatasetHeader, DatasetStaticHeader, DatasetTable, FileHeader, FileOffset};

pub use metadata::{hash, StringTable};

pub use reader::{TypedValue, UdfReader};

pub use source::{ByteRangeSource, CachedSource, MemorySource};

#[cfg(feature = "fs")]
pub use source::FileSource;
#[cfg(feature = "http")]
pub use source::HttpSource;
#[cfg(feature = "mmap")]
pub use source::MmapSource;

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use udf_rs::prelude::*;
    //! ```

    pub use crate::error::{ErrorKind, Result, UdfError};
    pub use crate::header::{DatasetHeader, DatasetTable, FileHeader, FileOffset};
    pub use crate::reader::{TypedValue, UdfReader};
    pub use crate::source::{ByteRangeSource, CachedSource, MemorySource};
    pub use crate::types::{Dimension, Primitive, Shape, TypeHint, TypeTag};

    #[cfg(feature = "fs")]
    pub use crate::source::FileSource;
    #[cfg(feature = "http")]
    pub use crate::source::HttpSource;
    #[cfg(feature = "mmap")]
    pub use crate::source::MmapSource;
}

/// The magic tag at the start of every container
pub const UDF_MAGIC: &[u8; 4] = FileHeader::MAGIC_TAG;

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
