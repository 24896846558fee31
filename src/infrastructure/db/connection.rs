use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::{error, info};

use crate::domain::error::{EtlError, Result};
use crate::infrastructure::config::EtlConfig;

/// Connect to MySQL and run a connectivity probe.
///
/// The pool is acquired once per run and reused for every chunk write.
/// An unreachable database is fatal at this point, before any file
/// content is touched by the sink.
pub async fn connect(config: &EtlConfig) -> Result<MySqlPool> {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name);

    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("failed to connect to MySQL: {}", e);
            EtlError::SinkConnect(format!(
                "{}:{}/{}: {}",
                config.host, config.port, config.name, e
            ))
        })?;

    sqlx::query("SELECT 1 as health_check")
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            error!("connectivity probe failed: {}", e);
            EtlError::SinkConnect(format!("health check failed: {}", e))
        })?;

    info!(
        "connected to MySQL at {}:{}/{}",
        config.host, config.port, config.name
    );
    Ok(pool)
}
