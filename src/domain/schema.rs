// ============================================================
// SCHEMA REGISTRY
// ============================================================
// Per-domain column requirements, defaults and output layout.
// These are process-wide constants, never mutated after startup.

use std::str::FromStr;

use super::error::EtlError;

/// How column names from the file are matched against schema names.
///
/// The sales import matches headers exactly; the facility imports
/// trim and lowercase before comparing. The divergence is part of the
/// existing file contracts and is kept on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMatch {
    Exact,
    Normalized,
}

/// Trim and lowercase a column name for insensitive matching.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Static description of one import domain.
pub struct DomainSchema {
    /// Columns that must exist in the input, else the run aborts.
    pub required: &'static [&'static str],
    /// Optional columns filled with a literal default when null/absent.
    /// Derived columns (e.g. sales totals) are handled by the cleaners.
    pub optional_defaults: &'static [(&'static str, &'static str)],
    /// Target column order written to the sink table.
    pub output_columns: &'static [&'static str],
    pub column_match: ColumnMatch,
}

impl DomainSchema {
    /// Literal default declared for an optional column, if any.
    pub fn default_for(&self, column: &str) -> Option<&'static str> {
        self.optional_defaults
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, default)| *default)
    }
}

pub const VENDAS_SCHEMA: DomainSchema = DomainSchema {
    required: &["data_venda", "produto", "preco_unitario"],
    optional_defaults: &[("loja", "Loja Padrão"), ("quantidade", "1")],
    output_columns: &[
        "data_venda",
        "hora_venda",
        "loja",
        "produto",
        "quantidade",
        "preco_unitario",
        "total",
    ],
    column_match: ColumnMatch::Exact,
};

pub const ESTOQUE_SCHEMA: DomainSchema = DomainSchema {
    required: &["categoria", "item", "quantidade", "unidade"],
    optional_defaults: &[
        ("categoria", "Geral"),
        ("item", "Sem descrição"),
        ("unidade", "un"),
    ],
    output_columns: &[
        "tipo",
        "categoria",
        "item",
        "unidade",
        "quantidade",
        "consumo_diario",
        "validade",
        "lote",
        "fornecedor",
        "observacoes",
    ],
    column_match: ColumnMatch::Normalized,
};

/// Metric columns coerced to numbers with 0 as fallback.
pub const SAUDE_NUMERIC_COLUMNS: &[&str] = &[
    "pressao_sistolica",
    "pressao_diastolica",
    "frequencia_cardiaca",
    "glicemia",
    "incidentes_quedas",
    "internacoes",
    "pontuacao_bem_estar",
    "taxa_ocupacao",
    "taxa_obito",
];

pub const SAUDE_SCHEMA: DomainSchema = DomainSchema {
    required: &[
        "data_ref",
        "pressao_sistolica",
        "pressao_diastolica",
        "frequencia_cardiaca",
        "glicemia",
    ],
    optional_defaults: &[],
    output_columns: &[
        "data_ref",
        "pressao_sistolica",
        "pressao_diastolica",
        "frequencia_cardiaca",
        "glicemia",
        "incidentes_quedas",
        "internacoes",
        "pontuacao_bem_estar",
        "taxa_ocupacao",
        "taxa_obito",
    ],
    column_match: ColumnMatch::Normalized,
};

/// Which import pipeline a run executes, selected by the caller's token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Vendas,
    EstoqueAlimentos,
    EstoqueLimpeza,
    SaudeDiaria,
}

impl ImportKind {
    pub fn schema(&self) -> &'static DomainSchema {
        match self {
            ImportKind::Vendas => &VENDAS_SCHEMA,
            ImportKind::EstoqueAlimentos | ImportKind::EstoqueLimpeza => &ESTOQUE_SCHEMA,
            ImportKind::SaudeDiaria => &SAUDE_SCHEMA,
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            ImportKind::Vendas => "vendas",
            ImportKind::EstoqueAlimentos | ImportKind::EstoqueLimpeza => "estoque_itens",
            ImportKind::SaudeDiaria => "metricas_saude",
        }
    }

    /// Rows per INSERT statement, bounding memory and transaction size.
    pub fn chunk_size(&self) -> usize {
        match self {
            ImportKind::Vendas => 1000,
            _ => 100,
        }
    }

    /// Sub-type tag stamped onto inventory rows.
    pub fn estoque_tag(&self) -> Option<&'static str> {
        match self {
            ImportKind::EstoqueAlimentos => Some("alimentos"),
            ImportKind::EstoqueLimpeza => Some("limpeza"),
            _ => None,
        }
    }
}

impl FromStr for ImportKind {
    type Err = EtlError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "vendas" => Ok(ImportKind::Vendas),
            "estoque_alimentos" => Ok(ImportKind::EstoqueAlimentos),
            "estoque_limpeza" => Ok(ImportKind::EstoqueLimpeza),
            "saude_diaria" => Ok(ImportKind::SaudeDiaria),
            other => Err(EtlError::UnknownImportType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tokens() {
        assert_eq!("vendas".parse::<ImportKind>().unwrap(), ImportKind::Vendas);
        assert_eq!(
            "estoque_limpeza".parse::<ImportKind>().unwrap(),
            ImportKind::EstoqueLimpeza
        );
        assert_eq!(
            "saude_diaria".parse::<ImportKind>().unwrap(),
            ImportKind::SaudeDiaria
        );
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let err = "estoque".parse::<ImportKind>().unwrap_err();
        assert!(matches!(err, EtlError::UnknownImportType(t) if t == "estoque"));
    }

    #[test]
    fn test_estoque_tags() {
        assert_eq!(ImportKind::EstoqueAlimentos.estoque_tag(), Some("alimentos"));
        assert_eq!(ImportKind::EstoqueLimpeza.estoque_tag(), Some("limpeza"));
        assert_eq!(ImportKind::Vendas.estoque_tag(), None);
    }

    #[test]
    fn test_chunk_sizes() {
        assert_eq!(ImportKind::Vendas.chunk_size(), 1000);
        assert_eq!(ImportKind::SaudeDiaria.chunk_size(), 100);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Consumo_Diario "), "consumo_diario");
    }

    #[test]
    fn test_declared_defaults() {
        assert_eq!(VENDAS_SCHEMA.default_for("loja"), Some("Loja Padrão"));
        assert_eq!(ESTOQUE_SCHEMA.default_for("item"), Some("Sem descrição"));
        assert_eq!(VENDAS_SCHEMA.default_for("produto"), None);
    }
}
