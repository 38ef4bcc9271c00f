//! Account expiry repository

use crate::db::UserDatabase;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use filter_expired_common::{Error, Result};
use sqlx::Connection;
use tracing::debug;

/// Naive layouts the user database is known to store, read as UTC
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Digit count at which an integer `expire` is read as milliseconds
const UNIX_MILLIS_DIGITS: usize = 13;

/// Expiry lookup trait
#[async_trait]
pub trait ExpiryRepository: Send + Sync {
    /// Expiry instant of the account behind `address`.
    ///
    /// `Ok(None)` means no such account.
    async fn expiry_for(&self, address: &str) -> Result<Option<DateTime<Utc>>>;
}

/// Database expiry repository
pub struct DbExpiryRepository {
    db: UserDatabase,
    query: String,
}

impl DbExpiryRepository {
    pub fn new(db: UserDatabase) -> Self {
        let query = format!(
            "SELECT CAST(expire AS TEXT) FROM {} WHERE user || '@' || domain = ?1 LIMIT 1",
            db.table()
        );
        Self { db, query }
    }
}

#[async_trait]
impl ExpiryRepository for DbExpiryRepository {
    async fn expiry_for(&self, address: &str) -> Result<Option<DateTime<Utc>>> {
        let mut conn = self.db.connect().await?;

        let row = sqlx::query_scalar::<_, Option<String>>(&self.query)
            .bind(address)
            .fetch_optional(&mut conn)
            .await;

        if let Err(e) = conn.close().await {
            debug!(error = %e, "Closing user database failed");
        }

        match row.map_err(|e| Error::Database(e.to_string()))? {
            None => Ok(None),
            Some(None) => Err(Error::Validation(format!(
                "NULL expire for {}",
                address
            ))),
            Some(Some(raw)) => parse_expiry(&raw).map(Some),
        }
    }
}

/// Parse a stored `expire` value.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.fff][+HH:MM]`, a bare date
/// (midnight UTC) or an integer Unix time: milliseconds when it has 13
/// digits, seconds otherwise.
pub fn parse_expiry(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    if let Ok(instant) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(instant.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let instant = raw.parse::<i64>().ok().and_then(|value| {
            if raw.len() == UNIX_MILLIS_DIGITS {
                DateTime::from_timestamp_millis(value)
            } else {
                DateTime::from_timestamp(value, 0)
            }
        });
        if let Some(instant) = instant {
            return Ok(instant);
        }
    }

    Err(Error::Validation(format!("Unrecognized expire value: {:?}", raw)))
}
