// ============================================================
// SPREADSHEET READER
// ============================================================
// Reads the first worksheet of an .xlsx/.xls file. Headers come from
// the first populated row; native date cells are kept as datetimes.

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};

use crate::domain::error::{EtlError, Result};
use crate::domain::record::{RawTable, RawValue};

pub fn read_table(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| EtlError::Parse(format!("failed to open spreadsheet: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EtlError::Parse("no worksheet found".to_string()))?
        .map_err(|e| EtlError::Parse(format!("failed to read worksheet: {}", e)))?;

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for row in range.rows() {
        if headers.is_none() {
            // Skip leading blank rows; the first populated row is the header.
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                continue;
            }
            headers = Some(row.iter().map(cell_to_header).collect());
            continue;
        }
        rows.push(row.iter().map(cell_to_value).collect());
    }

    Ok(RawTable::new(headers.unwrap_or_default(), rows))
}

fn cell_to_header(cell: &Data) -> String {
    cell.as_string().unwrap_or_else(|| format!("{}", cell))
}

fn cell_to_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                RawValue::Empty
            } else {
                RawValue::Text(s.clone())
            }
        }
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Int(*i),
        Data::Bool(b) => RawValue::Text(b.to_string()),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(RawValue::DateTime)
            .unwrap_or(RawValue::Empty),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_to_value(&Data::Empty), RawValue::Empty);
        assert_eq!(
            cell_to_value(&Data::String("  ".to_string())),
            RawValue::Empty
        );
        assert_eq!(cell_to_value(&Data::Float(2.5)), RawValue::Number(2.5));
        assert_eq!(cell_to_value(&Data::Int(7)), RawValue::Int(7));
        assert_eq!(
            cell_to_value(&Data::Bool(true)),
            RawValue::Text("true".to_string())
        );
    }

    #[test]
    fn test_header_conversion_stringifies_numbers() {
        assert_eq!(cell_to_header(&Data::String("produto".to_string())), "produto");
        assert_eq!(cell_to_header(&Data::Float(2024.0)), "2024");
    }
}
