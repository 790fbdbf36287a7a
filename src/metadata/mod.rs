// src/metadata/mod.rs
mod hash;
mod string_table;

pub use hash::hash;
pub use string_table::StringTable;
