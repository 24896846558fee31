// ============================================================
// SINK BRIDGE
// ============================================================
// Append-only chunked writes into a pre-existing table. No DDL is
// ever issued, and a chunk failure does not roll back chunks already
// committed (accepted limitation of the append contract).

use async_trait::async_trait;
use sqlx::mysql::MySqlPool;
use sqlx::QueryBuilder;
use tracing::debug;

use crate::domain::error::{EtlError, Result};
use crate::domain::record::{CleanBatch, SqlValue};

/// Destination for cleaned rows. One implementation writes to MySQL;
/// tests substitute an in-memory sink.
#[async_trait]
pub trait BatchSink {
    async fn append_chunk(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> Result<()>;
}

/// Drive a clean batch through the sink in fixed-size chunks,
/// returning the number of rows appended.
pub async fn write_batches(sink: &mut dyn BatchSink, batch: &CleanBatch) -> Result<usize> {
    let mut inserted = 0;
    for chunk in batch.rows.chunks(batch.chunk_size.max(1)) {
        sink.append_chunk(batch.table, batch.columns, chunk).await?;
        inserted += chunk.len();
        debug!("appended {} rows to {}", chunk.len(), batch.table);
    }
    Ok(inserted)
}

pub struct MySqlSink {
    pool: MySqlPool,
}

impl MySqlSink {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BatchSink for MySqlSink {
    async fn append_chunk(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<sqlx::MySql> =
            QueryBuilder::new(format!("INSERT INTO {} ({}) ", table, columns.join(", ")));

        builder.push_values(rows, |mut b, row| {
            for value in row {
                match value {
                    SqlValue::Null => {
                        b.push_bind(Option::<String>::None);
                    }
                    SqlValue::Text(s) => {
                        b.push_bind(s.clone());
                    }
                    SqlValue::Int(i) => {
                        b.push_bind(*i);
                    }
                    SqlValue::Float(f) => {
                        b.push_bind(*f);
                    }
                    SqlValue::Decimal(d) => {
                        b.push_bind(d.clone());
                    }
                    SqlValue::Date(d) => {
                        b.push_bind(*d);
                    }
                    SqlValue::Time(t) => {
                        b.push_bind(*t);
                    }
                }
            }
        });

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| EtlError::SinkWrite(format!("failed to append into {}: {}", table, e)))?;

        Ok(())
    }
}
