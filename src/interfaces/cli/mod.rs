// ============================================================
// CLI SURFACE
// ============================================================
// Argument parsing and result rendering. Progress logging goes to
// stderr via tracing; only the outcome (human or JSON) lands on
// stdout, so `--output-json` stays machine-parseable.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::error::{EtlError, Result};
use crate::domain::outcome::ImportOutcome;
use crate::domain::schema::ImportKind;

#[derive(Debug, Parser)]
#[command(
    name = "qw1-etl",
    version,
    about = "Importa planilhas CSV/Excel para o banco de relatórios QW1"
)]
pub struct Cli {
    /// Caminho do arquivo CSV ou Excel
    #[arg(long)]
    pub file: PathBuf,

    /// Tipo de importação: vendas, estoque_alimentos, estoque_limpeza
    /// ou saude_diaria
    #[arg(long, default_value = "vendas")]
    pub tipo: String,

    /// Retornar resultado em JSON
    #[arg(long = "output-json")]
    pub output_json: bool,
}

impl Cli {
    pub fn import_kind(&self) -> Result<ImportKind> {
        self.tipo.parse()
    }
}

pub fn print_banner() {
    println!("\n{}", "=".repeat(60));
    println!("QW1 ETL - Iniciando processamento");
    println!("{}\n", "=".repeat(60));
}

pub fn print_outcome(outcome: &ImportOutcome, json: bool) {
    if json {
        let rendered = serde_json::to_string(outcome)
            .unwrap_or_else(|_| r#"{"sucesso":false,"erro":"serialização falhou"}"#.to_string());
        println!("{}", rendered);
        return;
    }

    println!("\n{}", "=".repeat(60));
    println!("✅ ETL Concluído com Sucesso!");
    println!("{}", "=".repeat(60));
    println!("Linhas processadas: {}", outcome.records_read);
    println!("Linhas inseridas: {}", outcome.records_inserted);
    println!("Linhas descartadas: {}", outcome.records_discarded);
    if let Some(elapsed) = &outcome.elapsed {
        println!("Tempo de execução: {}", elapsed);
    }
    for message in &outcome.errors {
        println!("Aviso: {}", message);
    }
    println!("{}\n", "=".repeat(60));
}

pub fn print_failure(err: &EtlError, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "sucesso": false, "erro": err.to_string() })
        );
    } else {
        eprintln!("\n❌ Erro fatal: {}\n", err);
    }
}
