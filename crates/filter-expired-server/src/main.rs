//! filter-expired - OpenSMTPD filter entry point
//!
//! Reads the filter protocol on stdin and answers on stdout. Diagnostics go
//! to stderr only.

use anyhow::Result;
use filter_expired_common::config::{Config, LoggingConfig};
use filter_expired_core::{DispatchTable, FilterEngine};
use filter_expired_storage::{DbExpiryRepository, UserDatabase};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(&config.logging);

    info!(
        database = %config.database.path.display(),
        table = %config.database.table,
        "Starting filter-expired"
    );

    let db = UserDatabase::new(&config.database);
    let store = Arc::new(DbExpiryRepository::new(db));
    let engine = FilterEngine::new(DispatchTable::expiry_checks(store));

    let input = BufReader::new(tokio::io::stdin());
    engine
        .run(input, tokio::io::stdout())
        .await
        .map_err(|e| {
            error!(error = %e, "Protocol violation, exiting");
            e
        })?;

    info!("filter-expired shutdown complete");
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
