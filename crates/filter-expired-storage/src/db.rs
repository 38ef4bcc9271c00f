//! Database connection management

use filter_expired_common::config::DatabaseConfig;
use filter_expired_common::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::path::PathBuf;
use tracing::trace;

/// Handle on the user database file.
///
/// Holds no open connection; callers get a fresh one per lookup.
#[derive(Debug, Clone)]
pub struct UserDatabase {
    path: PathBuf,
    table: String,
}

impl UserDatabase {
    /// Create a handle from configuration
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            path: config.path.clone(),
            table: config.table.clone(),
        }
    }

    /// Table holding the user rows
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Open a read-only connection. A missing file is an error, never created.
    pub async fn connect(&self) -> Result<SqliteConnection> {
        trace!(path = %self.path.display(), "Opening user database");

        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .read_only(true)
            .create_if_missing(false);

        SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| {
                Error::Database(format!(
                    "Failed to open {}: {}",
                    self.path.display(),
                    e
                ))
            })
    }
}
