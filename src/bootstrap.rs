//! Process setup: telemetry, database pool, migrations.
//!
//! [`setup`] runs once at the start of a command and returns the handle that
//! every seeder receives explicitly.

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::config::{AppConfig, redact_database_url};
use crate::{db, telemetry};

/// Live handle to the configured environment.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub db: DatabaseConnection,
}

impl AppContext {
    /// Wraps an already-open connection, e.g. an in-memory test database.
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        Self { config, db }
    }
}

/// Initializes telemetry, connects, health-checks the pool and, when
/// `auto_migrate` is set, applies pending migrations.
pub async fn setup(config: AppConfig) -> Result<AppContext> {
    telemetry::init_tracing(&config).context("initializing telemetry")?;

    info!(
        profile = %config.profile,
        database_url = %redact_database_url(&config.database_url),
        "Bootstrapping catalog seeder"
    );
    if let Ok(json) = config.redacted_json() {
        debug!(config = %json, "Loaded configuration");
    }

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;
    db::health_check(&db).await?;

    if config.auto_migrate {
        run_migrations(&db).await?;
    }

    Ok(AppContext::new(config, db))
}

/// Applies all pending migrations.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    Migrator::up(db, None)
        .await
        .context("applying database migrations")?;
    info!("Database migrations are up to date");
    Ok(())
}
