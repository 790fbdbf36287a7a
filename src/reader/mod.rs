// src/reader/mod.rs
mod data;
mod text;
mod udf_reader;

pub use data::TypedValue;
pub use udf_reader::UdfReader;
