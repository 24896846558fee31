// ============================================================
// INVENTORY CLEANING USE CASE
// ============================================================
// Shared transform for the food and cleaning-supply inventories,
// parameterized by the sub-type tag.

use chrono::NaiveDate;

use super::validate::check_required_columns;
use crate::domain::error::Result;
use crate::domain::record::{value_at, CleanBatch, RawTable, SqlValue};
use crate::domain::schema::{ImportKind, ESTOQUE_SCHEMA};

/// One inventory row for the `estoque_itens` table. Inventory never
/// discards rows on data-quality grounds; bad numbers become 0 and bad
/// dates become null.
#[derive(Debug, Clone, PartialEq)]
pub struct EstoqueRecord {
    pub tipo: String,
    pub categoria: String,
    pub item: String,
    pub unidade: String,
    pub quantidade: f64,
    pub consumo_diario: f64,
    pub validade: Option<NaiveDate>,
    pub lote: Option<String>,
    pub fornecedor: Option<String>,
    pub observacoes: Option<String>,
}

impl EstoqueRecord {
    pub fn into_row(self) -> Vec<SqlValue> {
        vec![
            self.tipo.into(),
            self.categoria.into(),
            self.item.into(),
            self.unidade.into(),
            self.quantidade.into(),
            self.consumo_diario.into(),
            self.validade.into(),
            self.lote.into(),
            self.fornecedor.into(),
            self.observacoes.into(),
        ]
    }
}

pub fn estoque_batch(kind: ImportKind, rows: Vec<EstoqueRecord>) -> CleanBatch {
    CleanBatch {
        table: kind.table(),
        columns: ESTOQUE_SCHEMA.output_columns,
        chunk_size: kind.chunk_size(),
        rows: rows.into_iter().map(EstoqueRecord::into_row).collect(),
    }
}

/// Clean a raw inventory table, stamping every row with the sub-type
/// tag ("alimentos" or "limpeza"). Headers are matched after trimming
/// and lowercasing.
pub fn clean_estoque(table: RawTable, tag: &str) -> Result<Vec<EstoqueRecord>> {
    check_required_columns(&table, &ESTOQUE_SCHEMA)?;

    let matching = ESTOQUE_SCHEMA.column_match;
    let idx_categoria = table.column_index("categoria", matching);
    let idx_item = table.column_index("item", matching);
    let idx_unidade = table.column_index("unidade", matching);
    let idx_quantidade = table.column_index("quantidade", matching);
    let idx_consumo = table.column_index("consumo_diario", matching);
    let idx_validade = table.column_index("validade", matching);
    let idx_lote = table.column_index("lote", matching);
    let idx_fornecedor = table.column_index("fornecedor", matching);
    let idx_observacoes = table.column_index("observacoes", matching);

    let default_categoria = ESTOQUE_SCHEMA.default_for("categoria").unwrap_or("");
    let default_item = ESTOQUE_SCHEMA.default_for("item").unwrap_or("");
    let default_unidade = ESTOQUE_SCHEMA.default_for("unidade").unwrap_or("");

    let rows = table
        .rows
        .iter()
        .map(|row| EstoqueRecord {
            tipo: tag.to_string(),
            categoria: value_at(row, idx_categoria)
                .as_text()
                .unwrap_or_else(|| default_categoria.to_string()),
            item: value_at(row, idx_item)
                .as_text()
                .unwrap_or_else(|| default_item.to_string()),
            unidade: value_at(row, idx_unidade)
                .as_text()
                .unwrap_or_else(|| default_unidade.to_string()),
            quantidade: value_at(row, idx_quantidade).parse_float().unwrap_or(0.0),
            consumo_diario: value_at(row, idx_consumo).parse_float().unwrap_or(0.0),
            validade: value_at(row, idx_validade).parse_date(),
            lote: value_at(row, idx_lote).as_text(),
            fornecedor: value_at(row, idx_fornecedor).as_text(),
            observacoes: value_at(row, idx_observacoes).as_text(),
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RawValue;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    fn table(headers: &[&str], rows: Vec<Vec<RawValue>>) -> RawTable {
        RawTable::new(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    #[test]
    fn test_defaults_and_numeric_fallback() {
        let input = table(
            &["categoria", "item", "quantidade", "unidade"],
            vec![vec![text(""), text("Arroz"), text("abc"), text("kg")]],
        );
        let rows = clean_estoque(input, "alimentos").unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.tipo, "alimentos");
        assert_eq!(row.categoria, "Geral");
        assert_eq!(row.item, "Arroz");
        assert_eq!(row.quantidade, 0.0);
        assert_eq!(row.consumo_diario, 0.0);
        assert_eq!(row.validade, None);
        assert_eq!(row.lote, None);
    }

    #[test]
    fn test_no_row_is_ever_discarded() {
        let input = table(
            &["categoria", "item", "quantidade", "unidade"],
            vec![
                vec![RawValue::Empty, RawValue::Empty, RawValue::Empty, RawValue::Empty],
                vec![text("Limpeza"), text("Sabão"), text("-3"), text("un")],
            ],
        );
        let rows = clean_estoque(input, "limpeza").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item, "Sem descrição");
        assert_eq!(rows[0].unidade, "un");
        // Negative quantities pass through unchanged.
        assert_eq!(rows[1].quantidade, -3.0);
    }

    #[test]
    fn test_headers_are_trimmed_and_lowercased() {
        let input = table(
            &[" Categoria ", "Item", "QUANTIDADE", "Unidade", "Consumo_Diario"],
            vec![vec![text("Mercearia"), text("Feijão"), text("12.5"), text("kg"), text("0.8")]],
        );
        let rows = clean_estoque(input, "alimentos").unwrap();

        assert_eq!(rows[0].categoria, "Mercearia");
        assert_eq!(rows[0].quantidade, 12.5);
        assert_eq!(rows[0].consumo_diario, 0.8);
    }

    #[test]
    fn test_bad_validade_keeps_the_row() {
        let input = table(
            &["categoria", "item", "quantidade", "unidade", "validade"],
            vec![
                vec![text("G"), text("Leite"), text("2"), text("l"), text("30/02/não")],
                vec![text("G"), text("Ovos"), text("1"), text("dz"), text("2024-06-30")],
            ],
        );
        let rows = clean_estoque(input, "alimentos").unwrap();

        assert_eq!(rows[0].validade, None);
        assert_eq!(rows[1].validade, NaiveDate::from_ymd_opt(2024, 6, 30));
    }

    #[test]
    fn test_projection_has_all_ten_columns() {
        let input = table(
            &["categoria", "item", "quantidade", "unidade"],
            vec![vec![text("G"), text("Arroz"), text("5"), text("kg")]],
        );
        let rows = clean_estoque(input, "alimentos").unwrap();
        let batch = estoque_batch(ImportKind::EstoqueAlimentos, rows);

        assert_eq!(batch.table, "estoque_itens");
        assert_eq!(batch.chunk_size, 100);
        assert_eq!(batch.columns.len(), 10);
        assert_eq!(batch.rows[0].len(), 10);
        assert_eq!(batch.rows[0][0], SqlValue::Text("alimentos".to_string()));
        assert_eq!(batch.rows[0][9], SqlValue::Null);
    }
}
