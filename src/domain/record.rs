// ============================================================
// RECORD TYPES
// ============================================================
// Raw tabular data as read from disk, and cleaned rows ready
// for the database sink.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::schema::{normalize_name, ColumnMatch};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
];

/// A single untyped scalar as read from a CSV field or spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Int(i64),
    /// Native spreadsheet date/time cell.
    DateTime(NaiveDateTime),
    Empty,
}

/// Shared sentinel for out-of-range lookups.
pub const EMPTY: RawValue = RawValue::Empty;

impl RawValue {
    /// True when there is no usable value (missing cell or blank text).
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Non-empty trimmed text form, stringifying numeric cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Empty => None,
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            RawValue::Int(i) => Some(i.to_string()),
            RawValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    Some((*n as i64).to_string())
                } else {
                    Some(n.to_string())
                }
            }
            RawValue::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }

    /// Coerce to a calendar date. Unparseable values become None.
    pub fn parse_date(&self) -> Option<NaiveDate> {
        match self {
            RawValue::DateTime(dt) => Some(dt.date()),
            RawValue::Text(s) => {
                let trimmed = s.trim();
                for fmt in DATE_FORMATS {
                    if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
                        return Some(d);
                    }
                }
                for fmt in DATETIME_FORMATS {
                    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
                        return Some(dt.date());
                    }
                }
                None
            }
            _ => None,
        }
    }

    /// Coerce to a time of day. Text must be strict HH:MM:SS.
    pub fn parse_time(&self) -> Option<NaiveTime> {
        match self {
            RawValue::DateTime(dt) => Some(dt.time()),
            RawValue::Text(s) => NaiveTime::parse_from_str(s.trim(), "%H:%M:%S").ok(),
            _ => None,
        }
    }

    /// Coerce to an integer, truncating fractional input.
    pub fn parse_int(&self) -> Option<i64> {
        match self {
            RawValue::Int(i) => Some(*i),
            RawValue::Number(n) => Some(n.trunc() as i64),
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    return Some(i);
                }
                trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64)
            }
            _ => None,
        }
    }

    /// Coerce to a float.
    pub fn parse_float(&self) -> Option<f64> {
        match self {
            RawValue::Int(i) => Some(*i as f64),
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Coerce to an exact decimal (money columns).
    pub fn parse_decimal(&self) -> Option<BigDecimal> {
        match self {
            RawValue::Int(i) => Some(BigDecimal::from(*i)),
            RawValue::Number(n) => n.to_string().parse::<BigDecimal>().ok(),
            RawValue::Text(s) => s.trim().parse::<BigDecimal>().ok(),
            _ => None,
        }
    }
}

/// An ordered set of rows as read from one input file.
///
/// Headers are kept verbatim; rows are padded with empty values so every
/// row has exactly one value per header.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<RawValue>>) -> Self {
        let width = headers.len();
        for row in rows.iter_mut() {
            if row.len() < width {
                row.resize(width, RawValue::Empty);
            } else {
                row.truncate(width);
            }
        }
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Locate a column by name under the given matching policy.
    pub fn column_index(&self, name: &str, matching: ColumnMatch) -> Option<usize> {
        match matching {
            ColumnMatch::Exact => self.headers.iter().position(|h| h == name),
            ColumnMatch::Normalized => {
                let wanted = normalize_name(name);
                self.headers.iter().position(|h| normalize_name(h) == wanted)
            }
        }
    }

    pub fn has_column(&self, name: &str, matching: ColumnMatch) -> bool {
        self.column_index(name, matching).is_some()
    }
}

/// Fetch a value from a row by precomputed column index.
/// Absent columns read as empty for every row.
pub fn value_at<'a>(row: &'a [RawValue], index: Option<usize>) -> &'a RawValue {
    index.and_then(|i| row.get(i)).unwrap_or(&EMPTY)
}

/// A typed scalar ready to be bound into an INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Decimal(BigDecimal),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<BigDecimal> for SqlValue {
    fn from(v: BigDecimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(v: NaiveTime) -> Self {
        SqlValue::Time(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => SqlValue::Null,
        }
    }
}

/// Cleaned rows targeting one sink table, written in fixed-size chunks.
#[derive(Debug, Clone)]
pub struct CleanBatch {
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub chunk_size: usize,
    pub rows: Vec<Vec<SqlValue>>,
}

impl CleanBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_common_formats() {
        assert_eq!(
            RawValue::Text("2024-01-15".to_string()).parse_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            RawValue::Text("15/01/2024".to_string()).parse_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            RawValue::Text("2024-01-15 08:30:00".to_string()).parse_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(RawValue::Text("não é data".to_string()).parse_date(), None);
        assert_eq!(RawValue::Number(42.0).parse_date(), None);
    }

    #[test]
    fn test_parse_time_is_strict() {
        assert_eq!(
            RawValue::Text("08:30:00".to_string()).parse_time(),
            NaiveTime::from_hms_opt(8, 30, 0)
        );
        assert_eq!(RawValue::Text("08:30".to_string()).parse_time(), None);
        assert_eq!(RawValue::Text("8h30".to_string()).parse_time(), None);
    }

    #[test]
    fn test_parse_int_truncates_floats() {
        assert_eq!(RawValue::Text("3".to_string()).parse_int(), Some(3));
        assert_eq!(RawValue::Text("3.9".to_string()).parse_int(), Some(3));
        assert_eq!(RawValue::Number(2.0).parse_int(), Some(2));
        assert_eq!(RawValue::Text("abc".to_string()).parse_int(), None);
    }

    #[test]
    fn test_parse_decimal() {
        let d = RawValue::Text(" 10.50 ".to_string()).parse_decimal().unwrap();
        assert_eq!(d, "10.50".parse::<BigDecimal>().unwrap());
        assert_eq!(RawValue::Text("dez".to_string()).parse_decimal(), None);
    }

    #[test]
    fn test_row_padding() {
        let table = RawTable::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![vec![RawValue::Text("1".to_string())]],
        );
        assert_eq!(table.rows[0].len(), 3);
        assert!(table.rows[0][2].is_empty());
    }

    #[test]
    fn test_column_index_policies() {
        let table = RawTable::new(vec![" Categoria ".to_string()], vec![]);
        assert_eq!(table.column_index("categoria", ColumnMatch::Exact), None);
        assert_eq!(table.column_index("categoria", ColumnMatch::Normalized), Some(0));
    }

    #[test]
    fn test_sql_value_from_option() {
        let v: SqlValue = Option::<i64>::None.into();
        assert_eq!(v, SqlValue::Null);
        let v: SqlValue = Some(7i64).into();
        assert_eq!(v, SqlValue::Int(7));
    }
}
