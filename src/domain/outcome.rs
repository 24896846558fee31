use serde::Serialize;

/// Terminal result of one import run.
///
/// Field names follow the JSON contract consumed by the reporting
/// backend, so successful runs serialize with Portuguese keys.
/// `records_inserted + records_discarded` equals the rows surviving
/// blank-row removal.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    #[serde(rename = "sucesso")]
    pub success: bool,
    #[serde(rename = "linhas_lidas")]
    pub records_read: usize,
    #[serde(rename = "linhas_inseridas")]
    pub records_inserted: usize,
    #[serde(rename = "linhas_descartadas")]
    pub records_discarded: usize,
    #[serde(rename = "erros", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "tempo_execucao", skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<String>,
}

impl ImportOutcome {
    pub fn new(records_read: usize, records_inserted: usize, records_discarded: usize) -> Self {
        Self {
            success: true,
            records_read,
            records_inserted,
            records_discarded,
            errors: Vec::new(),
            elapsed: None,
        }
    }

    /// Outcome for a file with zero data rows: success, nothing written.
    pub fn empty_input() -> Self {
        Self {
            success: true,
            records_read: 0,
            records_inserted: 0,
            records_discarded: 0,
            errors: vec!["Arquivo vazio, nada a importar".to_string()],
            elapsed: None,
        }
    }
}
