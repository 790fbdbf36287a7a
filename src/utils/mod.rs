// src/utils/mod.rs
mod endian;
mod id;
mod string_encoding;

pub(crate) use endian::*;
pub(crate) use id::*;
pub(crate) use string_encoding::*;
