//! In-memory expiry store for tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use filter_expired_common::{Error, Result};
use filter_expired_storage::ExpiryRepository;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct StaticExpiryRepository {
    accounts: HashMap<String, DateTime<Utc>>,
    failures: HashSet<String>,
    lookups: AtomicUsize,
}

impl StaticExpiryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, address: &str, expire: DateTime<Utc>) -> Self {
        self.accounts.insert(address.to_string(), expire);
        self
    }

    pub fn with_failure(mut self, address: &str) -> Self {
        self.failures.insert(address.to_string());
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExpiryRepository for StaticExpiryRepository {
    async fn expiry_for(&self, address: &str) -> Result<Option<DateTime<Utc>>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failures.contains(address) {
            return Err(Error::Database(format!("lookup failed for {}", address)));
        }
        Ok(self.accounts.get(address).copied())
    }
}
