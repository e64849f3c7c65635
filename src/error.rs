//! # Error Handling
//!
//! Failures a seeding run can surface. Configuration problems are detected
//! before the transaction opens; persistence problems abort and roll back
//! the whole run.

use sea_orm::DbErr;
use thiserror::Error;

/// Errors raised by catalog seeding and verification.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A required upstream dependency or input is unusable; nothing was written.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The catalog fixture itself violates its uniqueness rules.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A database operation failed. Writes of the current run were rolled back.
    #[error("seeding failed while {step}: {source}")]
    Persistence {
        step: String,
        #[source]
        source: DbErr,
    },
}

impl SeedError {
    /// Wraps a database error with the step that produced it.
    pub fn persistence(step: impl Into<String>, source: DbErr) -> Self {
        Self::Persistence {
            step: step.into(),
            source,
        }
    }

    /// Whether the run failed before touching the database.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidCatalog(_))
    }
}

/// Adds step context to SeaORM results.
pub trait PersistenceContext<T> {
    fn step(self, step: &str) -> Result<T, SeedError>;
}

impl<T> PersistenceContext<T> for Result<T, DbErr> {
    fn step(self, step: &str) -> Result<T, SeedError> {
        self.map_err(|source| SeedError::persistence(step, source))
    }
}
