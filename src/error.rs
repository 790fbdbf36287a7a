// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP request failed with status {0}")]
    HttpStatus(u16),

    #[error("Invalid file offset {offset:#x}:{size:#x}")]
    InvalidFileOffset { offset: u64, size: u64 },

    #[error("Invalid file offset string: {0}")]
    InvalidFileOffsetString(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Insufficient bytes for {what}: expected {expected}, found {found}")]
    Truncated { what: &'static str, expected: u64, found: u64 },

    #[error("Invalid magic number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic { expected: u32, found: u32 },

    #[error("Invalid dataset check value: expected {expected:#010x}, found {found:#010x}")]
    InvalidCheck { expected: u32, found: u32 },

    #[error("Reserved field {index} must be zero, found {value:#x}")]
    ReservedNotZero { index: usize, value: u64 },

    #[error("Dataset header too large: header size {header_size} exceeds dataset size {dataset_size}")]
    HeaderTooLarge { header_size: u64, dataset_size: u64 },

    #[error("Dataset header too small: header size {header_size} cannot hold {required} bytes of structures")]
    HeaderTooSmall { header_size: u64, required: u64 },

    #[error("Misaligned {what}: {value} is not a multiple of {align}")]
    Misaligned { what: &'static str, value: u64, align: u64 },

    #[error("Dataset string out of bounds: {start}+{len} exceeds string length {string_len}")]
    StringOutOfBounds { start: u32, len: u32, string_len: u32 },

    #[error("Size mismatch: {0}")]
    SizeMismatch(String),

    #[error("Datatable {index} has a null key name")]
    MissingKeyName { index: usize },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    #[error("Invalid text in payload: {0}")]
    InvalidText(String),

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`UdfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A byte range reference failed its own structural checks.
    MalformedReference,
    /// Fewer bytes were available than the format requires.
    Truncated,
    /// A fixed magic or check constant did not match.
    InvalidMagic,
    /// A reserved field was non-zero.
    InvalidReserved,
    /// Declared sizes do not fit inside their enclosing region.
    SizeInconsistency,
    /// A required name resolved to nothing.
    MissingName,
    /// The data uses a feature this reader does not decode.
    Unsupported,
    /// The payload itself is malformed.
    MalformedPayload,
    /// The byte range source failed.
    Transport,
    /// A source was configured with invalid settings.
    Configuration,
}

impl UdfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UdfError::Io(_) | UdfError::HttpStatus(_) => ErrorKind::Transport,
            #[cfg(feature = "http")]
            UdfError::Http(_) => ErrorKind::Transport,
            UdfError::InvalidFileOffset { .. } | UdfError::InvalidFileOffsetString(_) => {
                ErrorKind::MalformedReference
            }
            UdfError::InvalidConfig(_) => ErrorKind::Configuration,
            UdfError::Truncated { .. } => ErrorKind::Truncated,
            UdfError::InvalidMagic { .. } | UdfError::InvalidCheck { .. } => ErrorKind::InvalidMagic,
            UdfError::ReservedNotZero { .. } => ErrorKind::InvalidReserved,
            UdfError::HeaderTooLarge { .. }
            | UdfError::HeaderTooSmall { .. }
            | UdfError::Misaligned { .. }
            | UdfError::StringOutOfBounds { .. }
            | UdfError::SizeMismatch(_) => ErrorKind::SizeInconsistency,
            UdfError::MissingKeyName { .. } => ErrorKind::MissingName,
            UdfError::TypeMismatch { .. } | UdfError::Unsupported(_) => ErrorKind::Unsupported,
            UdfError::InvalidText(_) | UdfError::Json(_) => ErrorKind::MalformedPayload,
        }
    }
}

pub type Result<T> = std::result::Result<T, UdfError>;
