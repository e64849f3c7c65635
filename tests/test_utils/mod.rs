//! Test utilities for database testing.
//!
//! In-memory SQLite databases with all migrations applied, plus fixture
//! helpers for the principals events are attributed to.

use anyhow::Result;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set, Statement};
use uuid::Uuid;

use catalog_seeder::models::user;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Inserts a user row directly for testing.
#[allow(dead_code)]
pub async fn insert_user(
    db: &DatabaseConnection,
    username: &str,
    email: Option<&str>,
    is_superuser: bool,
    is_staff: bool,
) -> Result<user::Model> {
    let model = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(email.map(str::to_string)),
        is_superuser: Set(is_superuser),
        is_staff: Set(is_staff),
        created_at: Set(Utc::now().into()),
    };
    Ok(model.insert(db).await?)
}

/// Executes raw SQL, e.g. to install a failure-injecting trigger.
#[allow(dead_code)]
pub async fn execute_sql(db: &DatabaseConnection, sql: &str) -> Result<()> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_string(),
    ))
    .await?;
    Ok(())
}

/// In-memory sink for formatted tracing output.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl CapturedLogs {
    /// Routes INFO and above on the current thread into this sink until the
    /// guard is dropped.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        let bytes = self
            .0
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
