// src/display.rs
//! Human readable rendering of decoded values.
//!
//! [`FileOffset`](crate::FileOffset), [`Shape`](crate::Shape) and
//! [`TypeTag`](crate::TypeTag) implement `Display` directly; this module adds
//! the remaining helpers.

use crate::header::{DatasetHeader, DatasetTable};
use std::fmt::Write;

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;
const TIB: f64 = GIB * 1024.0;

/// Format a byte count with binary units.
///
/// ```
/// use udf_rs::display::format_file_size;
///
/// assert_eq!(format_file_size(1), "1 byte");
/// assert_eq!(format_file_size(1536), "1.50 KiB");
/// ```
pub fn format_file_size(size: i64) -> String {
    if size < 0 {
        return format!("-{}", format_file_size_unsigned(size.unsigned_abs()));
    }
    format_file_size_unsigned(size as u64)
}

fn format_file_size_unsigned(size: u64) -> String {
    if size < 1024 {
        let suffix = if size == 1 { "byte" } else { "bytes" };
        return format!("{} {}", size, suffix);
    }
    let bytes = size as f64;
    let (value, unit) = if bytes < MIB {
        (bytes / KIB, "KiB")
    } else if bytes < GIB {
        (bytes / MIB, "MiB")
    } else if bytes < TIB {
        (bytes / GIB, "GiB")
    } else {
        (bytes / TIB, "TiB")
    };
    format!("{:.2} {}", value, unit)
}

/// One line summary of a datatable
pub fn describe_table(table: &DatasetTable) -> String {
    let mut line = format!(
        "{} {} {} {} @ {}",
        table.key_name,
        table.type_info,
        table.data_shape,
        format_file_size(table.data_size as i64),
        table.file_offset
    );
    if table.compress_info != 0 {
        let _ = write!(line, " compressed({:#x})", table.compress_info);
    }
    if let Some(index) = &table.index_name {
        let _ = write!(line, " index={}", index);
    }
    if let Some(related) = &table.related_name {
        let _ = write!(line, " related={}", related);
    }
    if let Some(type_name) = &table.type_name {
        let _ = write!(line, " type={}", type_name);
    }
    line
}

/// Multi-line listing of a dataset and its tables
pub fn describe_dataset(dataset: &DatasetHeader) -> String {
    let mut out = format!(
        "dataset {} @ {} ({} header, {} tables)\n",
        dataset.id,
        dataset.file_offset,
        format_file_size(dataset.header_size as i64),
        dataset.tables.len()
    );
    for table in &dataset.tables {
        out.push_str("  ");
        out.push_str(&describe_table(table));
        out.push('\n');
    }
    out
}
