use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{EtlError, Result};

/// Database connection settings, read once at startup from `DB_*`
/// environment variables over the documented defaults. Passed by
/// reference into the pipeline; there is no global connection state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            name: "qw1_relatorios".to_string(),
        }
    }
}

impl EtlConfig {
    /// Merge `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and
    /// `DB_NAME` over the defaults. Absence of all of them is legal.
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(EtlConfig::default()))
            .merge(Env::prefixed("DB_"))
            .extract()
            .map_err(|e| EtlError::Config(e.to_string()))
    }
}
