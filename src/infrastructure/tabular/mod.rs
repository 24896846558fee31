pub mod csv_reader;
pub mod xlsx_reader;

use std::path::Path;

use tracing::info;

use crate::domain::error::{EtlError, Result};
use crate::domain::record::RawTable;

/// Read a tabular file into a raw table, dispatching on the extension.
///
/// `.csv` goes to the delimited-text reader, `.xlsx`/`.xls` to the
/// spreadsheet reader (extension match is case-insensitive). Any other
/// extension fails before a single row is read.
pub fn load_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(EtlError::NotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let table = match extension.as_str() {
        "csv" => csv_reader::read_table(path)?,
        "xlsx" | "xls" => xlsx_reader::read_table(path)?,
        other => return Err(EtlError::UnsupportedFormat(format!(".{}", other))),
    };

    info!(
        "read {} rows ({} columns) from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}
