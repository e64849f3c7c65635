//! Global tracing setup.
//!
//! Logs go to stderr; stdout carries only the seeding report.

use std::any::type_name_of_val;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, fmt,
    filter::ParseError,
    layer::{Layer, SubscriberExt},
};

use crate::config::AppConfig;

/// Statement logs from sqlx are noise unless explicitly requested.
const QUIET_DEPENDENCIES: &[&str] = &["sqlx=warn", "sea_orm_migration=warn"];

#[derive(Debug, Error)]
pub enum TelemetryInitError {
    #[error("invalid log level '{level}': {source}")]
    Filter {
        level: String,
        #[source]
        source: ParseError,
    },
}

static TELEMETRY_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Builds the filter: `RUST_LOG` when set, otherwise the configured level
/// with dependency logs turned down.
pub fn build_filter(config: &AppConfig) -> Result<EnvFilter, TelemetryInitError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut directives = vec![config.log_level.clone()];
    directives.extend(QUIET_DEPENDENCIES.iter().map(|d| d.to_string()));

    EnvFilter::try_new(directives.join(",")).map_err(|source| TelemetryInitError::Filter {
        level: config.log_level.clone(),
        source,
    })
}

/// Installs the `log` bridge and the global subscriber once per process.
/// Later calls are no-ops. A logger or subscriber installed by someone else
/// is reported on stderr and left in place.
pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryInitError> {
    if TELEMETRY_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let filter = match build_filter(config) {
        Ok(filter) => filter,
        Err(err) => {
            TELEMETRY_INITIALIZED.store(false, Ordering::SeqCst);
            return Err(err);
        }
    };

    // SeaORM and sqlx report through `log`.
    if let Err(err) = LogTracer::builder()
        .with_max_level(log::LevelFilter::Trace)
        .init()
    {
        if !type_name_of_val(log::logger()).contains("LogTracer") {
            eprintln!("Warning: `log` records will not be traced: {err}");
        }
    }

    let layer = if config.log_format == "json" {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .boxed()
    };

    // `set_global_default` leaves the `log` bridge above untouched.
    let subscriber = tracing_subscriber::registry().with(filter).with(layer);
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: keeping the existing tracing subscriber: {err}");
    }

    Ok(())
}
