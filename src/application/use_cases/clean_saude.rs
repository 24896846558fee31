// ============================================================
// HEALTH METRICS CLEANING USE CASE
// ============================================================
// Daily facility health indicators for the `metricas_saude` table.

use chrono::NaiveDate;
use tracing::debug;

use super::validate::check_required_columns;
use crate::domain::error::Result;
use crate::domain::record::{value_at, CleanBatch, RawTable, SqlValue};
use crate::domain::schema::{ImportKind, SAUDE_NUMERIC_COLUMNS, SAUDE_SCHEMA};

/// One metrics row. `data_ref` is the only critical field; every
/// numeric metric defaults to 0 when missing or unparseable.
#[derive(Debug, Clone, PartialEq)]
pub struct SaudeRecord {
    pub data_ref: NaiveDate,
    pub metrics: [f64; 9],
}

impl SaudeRecord {
    pub fn into_row(self) -> Vec<SqlValue> {
        let mut row: Vec<SqlValue> = Vec::with_capacity(10);
        row.push(self.data_ref.into());
        row.extend(self.metrics.into_iter().map(SqlValue::from));
        row
    }

    /// Metric value by column name, for reporting callers.
    pub fn metric(&self, column: &str) -> Option<f64> {
        SAUDE_NUMERIC_COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|i| self.metrics[i])
    }
}

#[derive(Debug)]
pub struct SaudeResult {
    pub rows: Vec<SaudeRecord>,
    /// Rows dropped because `data_ref` was missing or unparseable.
    pub discarded: usize,
}

impl SaudeResult {
    pub fn into_batch(self) -> (CleanBatch, usize) {
        let discarded = self.discarded;
        let batch = CleanBatch {
            table: ImportKind::SaudeDiaria.table(),
            columns: SAUDE_SCHEMA.output_columns,
            chunk_size: ImportKind::SaudeDiaria.chunk_size(),
            rows: self.rows.into_iter().map(SaudeRecord::into_row).collect(),
        };
        (batch, discarded)
    }
}

/// Clean a raw health-metrics table. Headers are matched after trimming
/// and lowercasing; rows without a parseable `data_ref` are dropped.
pub fn clean_saude(table: RawTable) -> Result<SaudeResult> {
    check_required_columns(&table, &SAUDE_SCHEMA)?;

    let matching = SAUDE_SCHEMA.column_match;
    let idx_data_ref = table.column_index("data_ref", matching);
    let metric_indices: Vec<Option<usize>> = SAUDE_NUMERIC_COLUMNS
        .iter()
        .map(|col| table.column_index(col, matching))
        .collect();

    let before_filter = table.len();
    let rows: Vec<SaudeRecord> = table
        .rows
        .iter()
        .filter_map(|row| {
            let data_ref = value_at(row, idx_data_ref).parse_date()?;
            let mut metrics = [0.0f64; 9];
            for (slot, idx) in metrics.iter_mut().zip(metric_indices.iter()) {
                *slot = value_at(row, *idx).parse_float().unwrap_or(0.0);
            }
            Some(SaudeRecord { data_ref, metrics })
        })
        .collect();

    let discarded = before_filter - rows.len();
    if discarded > 0 {
        debug!("dropped {} metric rows without a valid data_ref", discarded);
    }

    Ok(SaudeResult { rows, discarded })
}
