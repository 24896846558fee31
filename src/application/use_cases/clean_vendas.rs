// ============================================================
// SALES CLEANING USE CASE
// ============================================================
// Normalize, derive and filter sales spreadsheet rows for the
// `vendas` table.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use super::validate::check_required_columns;
use crate::domain::error::Result;
use crate::domain::record::{value_at, CleanBatch, RawTable, SqlValue};
use crate::domain::schema::{ImportKind, VENDAS_SCHEMA};

/// One sales row after cleaning. Critical fields are non-null by
/// construction; rows failing them were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct VendaRecord {
    pub data_venda: NaiveDate,
    pub hora_venda: Option<NaiveTime>,
    pub loja: String,
    pub produto: String,
    pub quantidade: i64,
    pub preco_unitario: BigDecimal,
    pub total: BigDecimal,
}

impl VendaRecord {
    pub fn into_row(self) -> Vec<SqlValue> {
        vec![
            self.data_venda.into(),
            self.hora_venda.into(),
            self.loja.into(),
            self.produto.into(),
            self.quantidade.into(),
            self.preco_unitario.into(),
            self.total.into(),
        ]
    }
}

#[derive(Debug)]
pub struct VendasResult {
    pub rows: Vec<VendaRecord>,
    /// Rows dropped by the critical-field filter. Fully-blank rows are
    /// not counted here.
    pub discarded: usize,
}

impl VendasResult {
    pub fn into_batch(self) -> (CleanBatch, usize) {
        let discarded = self.discarded;
        let batch = CleanBatch {
            table: ImportKind::Vendas.table(),
            columns: VENDAS_SCHEMA.output_columns,
            chunk_size: ImportKind::Vendas.chunk_size(),
            rows: self.rows.into_iter().map(VendaRecord::into_row).collect(),
        };
        (batch, discarded)
    }
}

struct PartialVenda {
    data_venda: Option<NaiveDate>,
    hora_venda: Option<NaiveTime>,
    loja: String,
    produto: Option<String>,
    quantidade: i64,
    preco_unitario: Option<BigDecimal>,
    total: Option<BigDecimal>,
}

/// Clean a raw sales table.
///
/// Order of operations: required-column check, blank-row removal, field
/// coercion with defaults, total derivation, critical-field filter.
/// Headers are matched exactly (the sales file contract is
/// case-sensitive).
pub fn clean_vendas(table: RawTable) -> Result<VendasResult> {
    check_required_columns(&table, &VENDAS_SCHEMA)?;

    let matching = VENDAS_SCHEMA.column_match;
    let idx_data = table.column_index("data_venda", matching);
    let idx_hora = table.column_index("hora_venda", matching);
    let idx_loja = table.column_index("loja", matching);
    let idx_produto = table.column_index("produto", matching);
    let idx_quantidade = table.column_index("quantidade", matching);
    let idx_preco = table.column_index("preco_unitario", matching);
    let idx_total = table.column_index("total", matching);

    let default_loja = VENDAS_SCHEMA.default_for("loja").unwrap_or("");
    let default_quantidade: i64 = VENDAS_SCHEMA
        .default_for("quantidade")
        .and_then(|d| d.parse().ok())
        .unwrap_or(1);

    let mut partials: Vec<PartialVenda> = table
        .rows
        .iter()
        .filter(|row| !row.iter().all(|v| v.is_empty()))
        .map(|row| PartialVenda {
            data_venda: value_at(row, idx_data).parse_date(),
            hora_venda: value_at(row, idx_hora).parse_time(),
            loja: value_at(row, idx_loja)
                .as_text()
                .unwrap_or_else(|| default_loja.to_string()),
            produto: value_at(row, idx_produto).as_text(),
            quantidade: value_at(row, idx_quantidade)
                .parse_int()
                .unwrap_or(default_quantidade),
            preco_unitario: value_at(row, idx_preco).parse_decimal(),
            total: value_at(row, idx_total).parse_decimal(),
        })
        .collect();

    // Derive totals only where the source did not supply a valid one.
    // Supplied totals are trusted even when inconsistent with
    // quantidade × preco_unitario.
    for partial in partials.iter_mut() {
        if partial.total.is_none() {
            partial.total = partial
                .preco_unitario
                .as_ref()
                .map(|preco| BigDecimal::from(partial.quantidade) * preco);
        }
    }

    let before_filter = partials.len();
    let rows: Vec<VendaRecord> = partials
        .into_iter()
        .filter_map(|partial| {
            let (data_venda, produto, preco_unitario) = match (
                partial.data_venda,
                partial.produto,
                partial.preco_unitario,
            ) {
                (Some(d), Some(p), Some(preco)) => (d, p, preco),
                _ => return None,
            };
            let total = partial
                .total
                .unwrap_or_else(|| BigDecimal::from(partial.quantidade) * &preco_unitario);
            Some(VendaRecord {
                data_venda,
                hora_venda: partial.hora_venda,
                loja: partial.loja,
                produto,
                quantidade: partial.quantidade,
                preco_unitario,
                total,
            })
        })
        .collect();

    let discarded = before_filter - rows.len();
    if discarded > 0 {
        debug!("dropped {} sales rows with invalid critical fields", discarded);
    }

    Ok(VendasResult { rows, discarded })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::EtlError;
    use crate::domain::record::RawValue;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    fn table(headers: &[&str], rows: Vec<Vec<RawValue>>) -> RawTable {
        RawTable::new(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    fn decimal(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_total_is_derived_from_quantity_and_price() {
        let input = table(
            &["data_venda", "produto", "preco_unitario", "quantidade"],
            vec![vec![text("2024-01-01"), text("X"), text("10"), text("2")]],
        );
        let result = clean_vendas(input).unwrap();

        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.discarded, 0);
        let row = &result.rows[0];
        assert_eq!(row.total, decimal("20"));
        assert_eq!(row.quantidade, 2);
        assert_eq!(row.loja, "Loja Padrão");
        assert_eq!(row.hora_venda, None);
    }

    #[test]
    fn test_row_missing_price_is_discarded() {
        let input = table(
            &["data_venda", "produto", "preco_unitario"],
            vec![
                vec![text("2024-01-01"), text("X"), text("10")],
                vec![text("2024-01-02"), text("Y"), RawValue::Empty],
            ],
        );
        let result = clean_vendas(input).unwrap();

        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.discarded, 1);
    }

    #[test]
    fn test_unparseable_date_is_discarded() {
        let input = table(
            &["data_venda", "produto", "preco_unitario"],
            vec![vec![text("ontem"), text("X"), text("10")]],
        );
        let result = clean_vendas(input).unwrap();

        assert!(result.rows.is_empty());
        assert_eq!(result.discarded, 1);
    }

    #[test]
    fn test_blank_rows_are_removed_without_counting_as_discarded() {
        let input = table(
            &["data_venda", "produto", "preco_unitario"],
            vec![
                vec![RawValue::Empty, RawValue::Empty, RawValue::Empty],
                vec![text("2024-01-01"), text("X"), text("10")],
            ],
        );
        let result = clean_vendas(input).unwrap();

        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.discarded, 0);
    }

    #[test]
    fn test_supplied_total_is_kept_even_when_inconsistent() {
        let input = table(
            &["data_venda", "produto", "preco_unitario", "quantidade", "total"],
            vec![
                vec![text("2024-01-01"), text("X"), text("10"), text("2"), text("99")],
                vec![text("2024-01-02"), text("Y"), text("5"), text("3"), RawValue::Empty],
            ],
        );
        let result = clean_vendas(input).unwrap();

        assert_eq!(result.rows[0].total, decimal("99"));
        assert_eq!(result.rows[1].total, decimal("15"));
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let input = table(
            &["data_venda", "produto", "preco_unitario", "quantidade"],
            vec![vec![text("2024-01-01"), text("X"), text("7.50"), text("muitos")]],
        );
        let result = clean_vendas(input).unwrap();

        assert_eq!(result.rows[0].quantidade, 1);
        assert_eq!(result.rows[0].total, decimal("7.50"));
    }

    #[test]
    fn test_hora_venda_strict_format() {
        let input = table(
            &["data_venda", "hora_venda", "produto", "preco_unitario"],
            vec![
                vec![text("2024-01-01"), text("14:30:00"), text("X"), text("1")],
                vec![text("2024-01-01"), text("14h30"), text("Y"), text("1")],
            ],
        );
        let result = clean_vendas(input).unwrap();

        assert_eq!(result.rows[0].hora_venda, NaiveTime::from_hms_opt(14, 30, 0));
        assert_eq!(result.rows[1].hora_venda, None);
    }

    #[test]
    fn test_missing_required_column_fails_before_cleaning() {
        let input = table(
            &["data_venda", "preco_unitario"],
            vec![vec![text("2024-01-01"), text("10")]],
        );
        let err = clean_vendas(input).unwrap_err();
        assert!(matches!(err, EtlError::MissingColumns(cols) if cols == vec!["produto"]));
    }

    #[test]
    fn test_output_row_projection() {
        let input = table(
            &["total", "preco_unitario", "produto", "data_venda"],
            vec![vec![text("20"), text("10"), text("X"), text("2024-01-01")]],
        );
        let result = clean_vendas(input).unwrap();
        let (batch, discarded) = result.into_batch();

        assert_eq!(discarded, 0);
        assert_eq!(batch.table, "vendas");
        assert_eq!(batch.chunk_size, 1000);
        assert_eq!(
            batch.columns,
            ["data_venda", "hora_venda", "loja", "produto", "quantidade", "preco_unitario", "total"]
                .as_slice()
        );
        // Input column order does not leak into the projection.
        assert_eq!(batch.rows[0][3], SqlValue::Text("X".to_string()));
        assert_eq!(batch.rows[0][6], SqlValue::Decimal(decimal("20")));
    }
}
