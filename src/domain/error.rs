use std::fmt;

/// Fatal error kinds for one import run.
///
/// Row-level data problems (bad dates, bad numbers) are never errors:
/// they are defaulted or routed into the discard count by the cleaning
/// step. Everything here aborts the run and maps to exit code 1.
#[derive(Debug)]
pub enum EtlError {
    /// Input path does not exist.
    NotFound(String),
    /// File extension is not .csv/.xlsx/.xls.
    UnsupportedFormat(String),
    /// Required columns absent from the input, listed by name.
    MissingColumns(Vec<String>),
    /// Dispatch token does not name a known import type.
    UnknownImportType(String),
    Config(String),
    Parse(String),
    Io(String),
    /// Initial connectivity probe against the database failed.
    SinkConnect(String),
    /// A chunked append failed; earlier chunks may already be committed.
    SinkWrite(String),
}

impl fmt::Display for EtlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtlError::NotFound(path) => write!(f, "Arquivo não encontrado: {}", path),
            EtlError::UnsupportedFormat(ext) => {
                write!(f, "Formato de arquivo não suportado: {}", ext)
            }
            EtlError::MissingColumns(cols) => {
                write!(f, "Colunas obrigatórias faltando: {}", cols.join(", "))
            }
            EtlError::UnknownImportType(token) => {
                write!(f, "Tipo de importação desconhecido: {}", token)
            }
            EtlError::Config(msg) => write!(f, "Configuração inválida: {}", msg),
            EtlError::Parse(msg) => write!(f, "Erro ao ler arquivo: {}", msg),
            EtlError::Io(msg) => write!(f, "Erro de E/S: {}", msg),
            EtlError::SinkConnect(msg) => write!(f, "Falha ao conectar ao banco: {}", msg),
            EtlError::SinkWrite(msg) => write!(f, "Erro ao inserir dados: {}", msg),
        }
    }
}

impl std::error::Error for EtlError {}

impl From<std::io::Error> for EtlError {
    fn from(err: std::io::Error) -> Self {
        EtlError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
