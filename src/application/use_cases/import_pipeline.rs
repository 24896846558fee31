// ============================================================
// IMPORT PIPELINE USE CASE
// ============================================================
// One file in, one outcome out: load → validate → clean → append.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use super::clean_estoque::{clean_estoque, estoque_batch};
use super::clean_saude::clean_saude;
use super::clean_vendas::clean_vendas;
use crate::domain::error::Result;
use crate::domain::outcome::ImportOutcome;
use crate::domain::record::{CleanBatch, RawTable};
use crate::domain::schema::ImportKind;
use crate::infrastructure::config::EtlConfig;
use crate::infrastructure::db::{connect, write_batches, BatchSink, MySqlSink};
use crate::infrastructure::tabular::load_table;

/// Dispatch a raw table to its domain cleaner.
///
/// Returns the clean batch plus the number of rows discarded by the
/// domain's own filter (zero for inventory, which never discards).
pub fn clean(kind: ImportKind, table: RawTable) -> Result<(CleanBatch, usize)> {
    match kind {
        ImportKind::Vendas => Ok(clean_vendas(table)?.into_batch()),
        ImportKind::EstoqueAlimentos | ImportKind::EstoqueLimpeza => {
            let tag = kind.estoque_tag().unwrap_or("");
            let rows = clean_estoque(table, tag)?;
            Ok((estoque_batch(kind, rows), 0))
        }
        ImportKind::SaudeDiaria => Ok(clean_saude(table)?.into_batch()),
    }
}

/// Clean a loaded table and append it through the given sink.
pub async fn import_table(
    kind: ImportKind,
    table: RawTable,
    sink: &mut dyn BatchSink,
) -> Result<ImportOutcome> {
    let records_read = table.len();
    let (batch, discarded) = clean(kind, table)?;
    let inserted = write_batches(sink, &batch).await?;
    Ok(ImportOutcome::new(records_read, inserted, discarded))
}

/// Full run for one file: read it, clean it, bulk-append it to MySQL.
///
/// A file with zero data rows short-circuits to a successful outcome
/// without opening a database connection.
pub async fn run_import(kind: ImportKind, path: &Path, config: &EtlConfig) -> Result<ImportOutcome> {
    let started = Instant::now();

    let table = load_table(path)?;
    if table.is_empty() {
        info!("input file has no data rows, nothing to import");
        let mut outcome = ImportOutcome::empty_input();
        outcome.elapsed = Some(format_elapsed(&started));
        return Ok(outcome);
    }

    let records_read = table.len();
    let (batch, discarded) = clean(kind, table)?;
    info!(
        "{} rows ready for table {} ({} discarded)",
        batch.len(),
        batch.table,
        discarded
    );

    // Validation and cleaning run before the connection is opened, so a
    // broken file never needs a reachable database to be rejected.
    let pool = connect(config).await?;
    let mut sink = MySqlSink::new(pool);
    let inserted = write_batches(&mut sink, &batch).await?;
    info!(
        "import into {} finished: {} inserted, {} discarded",
        batch.table, inserted, discarded
    );

    let mut outcome = ImportOutcome::new(records_read, inserted, discarded);
    outcome.elapsed = Some(format_elapsed(&started));
    Ok(outcome)
}

fn format_elapsed(started: &Instant) -> String {
    format!("{:.2}s", started.elapsed().as_secs_f64())
}
