use crate::domain::error::{EtlError, Result};
use crate::domain::record::RawTable;
use crate::domain::schema::DomainSchema;

/// Fail fast when required columns are absent, naming every offender.
///
/// Runs before any row-level cleaning, so a file with a bad header is
/// rejected regardless of its row content. Column matching follows the
/// schema's own policy.
pub fn check_required_columns(table: &RawTable, schema: &DomainSchema) -> Result<()> {
    let missing: Vec<String> = schema
        .required
        .iter()
        .filter(|col| !table.has_column(col, schema.column_match))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EtlError::MissingColumns(missing))
    }
}
