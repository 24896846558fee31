// ============================================================
// CSV READER
// ============================================================
// Delimited-text reader with encoding fallback. Headers are taken
// verbatim from the first record; values keep their raw text.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use encoding_rs::WINDOWS_1252;

use crate::domain::error::{EtlError, Result};
use crate::domain::record::{RawTable, RawValue};

pub fn read_table(path: &Path) -> Result<RawTable> {
    let bytes = fs::read(path)
        .map_err(|e| EtlError::Io(format!("failed to read {}: {}", path.display(), e)))?;
    read_content(&decode(&bytes))
}

/// UTF-8 when valid, Windows-1252 otherwise (legacy exports).
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

pub fn read_content(content: &str) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::None)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| EtlError::Parse(format!("failed to read CSV headers: {}", e)))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| EtlError::Parse(format!("failed to parse CSV row {}: {}", index + 1, e)))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        RawValue::Empty
                    } else {
                        RawValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable::new(headers, rows))
}
