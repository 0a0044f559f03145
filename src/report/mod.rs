//! Persistent reporting: the append-only quote log and paper-trade
//! ledgers, both plain CSV so they can be inspected without tooling.

pub mod paper;
pub mod quote_log;

use std::fs::OpenOptions;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Append serializable rows to a CSV file, writing the header only when
/// the file is new or empty. Existing rows are never rewritten.
pub(crate) fn append_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let needs_header = match std::fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
