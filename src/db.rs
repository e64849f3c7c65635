//! Database connection management.
//!
//! Opens a SeaORM pool (Postgres or SQLite) from [`AppConfig`], retrying
//! transient connection failures with exponential backoff.

use std::time::Duration;

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::{AppConfig, redact_database_url};

const CONNECT_ATTEMPTS: u32 = 5;
const INITIAL_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("failed to connect to {url} after {attempts} attempts: {source}")]
    ConnectionFailed {
        url: String,
        attempts: u32,
        #[source]
        source: DbErr,
    },
    #[error("invalid database configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// In-memory SQLite databases live per connection, so their pool is pinned
/// to one connection.
fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && url.contains(":memory:")
}

/// Pool options derived from the configuration.
pub fn connect_options(cfg: &AppConfig) -> ConnectOptions {
    let max_connections = if is_sqlite_memory(&cfg.database_url) {
        1
    } else {
        cfg.db_max_connections
    };

    let mut opt = ConnectOptions::new(cfg.database_url.clone());
    opt.max_connections(max_connections)
        .acquire_timeout(Duration::from_millis(cfg.db_acquire_timeout_ms))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);
    opt
}

/// Connects with up to five attempts, doubling the delay from 100ms.
pub async fn init_pool(cfg: &AppConfig) -> Result<DatabaseConnection> {
    if cfg.database_url.trim().is_empty() {
        return Err(DatabaseError::InvalidConfiguration {
            message: "database URL cannot be empty".to_string(),
        }
        .into());
    }

    let redacted = redact_database_url(&cfg.database_url);
    let opt = connect_options(cfg);
    let mut delay = INITIAL_BACKOFF;
    let mut attempt = 1;

    loop {
        match Database::connect(opt.clone()).await {
            Ok(conn) => {
                info!(url = %redacted, attempt, "Connected to database");
                return Ok(conn);
            }
            Err(source) if attempt >= CONNECT_ATTEMPTS => {
                return Err(DatabaseError::ConnectionFailed {
                    url: redacted,
                    attempts: attempt,
                    source,
                }
                .into());
            }
            Err(err) => {
                warn!(
                    url = %redacted,
                    attempt,
                    retry_in_ms = delay.as_millis() as u64,
                    error = %err,
                    "Database connection failed; retrying"
                );
                sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
        }
    }
}

/// Runs `SELECT 1` to prove the pool is usable.
pub async fn health_check(db: &DatabaseConnection) -> Result<()> {
    let stmt = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    db.query_one(stmt)
        .await
        .context("database health check failed")?;
    Ok(())
}
