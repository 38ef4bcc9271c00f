//! Decision handlers
//!
//! A handler turns the address carried by an event into a verdict. Store
//! trouble of any kind lets the mail through: an unreachable database must
//! never stop legitimate traffic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use filter_expired_common::{Phase, Result, Verdict};
use filter_expired_storage::ExpiryRepository;
use std::sync::Arc;
use tracing::{debug, warn};

/// Produces exactly one verdict per event
#[async_trait]
pub trait DecisionHandler: Send + Sync {
    /// Phase this handler answers
    fn phase(&self) -> Phase;

    /// Decide on the subject address of one event
    async fn decide(&self, address: &str) -> Verdict;
}

/// Rejects addresses whose account has expired
pub struct ExpiryCheck {
    phase: Phase,
    store: Arc<dyn ExpiryRepository>,
}

impl ExpiryCheck {
    pub fn new(phase: Phase, store: Arc<dyn ExpiryRepository>) -> Self {
        Self { phase, store }
    }
}

#[async_trait]
impl DecisionHandler for ExpiryCheck {
    fn phase(&self) -> Phase {
        self.phase
    }

    async fn decide(&self, address: &str) -> Verdict {
        let lookup = self.store.expiry_for(address).await;
        verdict_for(self.phase, address, lookup, Utc::now())
    }
}

/// Apply the expiry policy to a lookup result
pub fn verdict_for(
    phase: Phase,
    address: &str,
    lookup: Result<Option<DateTime<Utc>>>,
    now: DateTime<Utc>,
) -> Verdict {
    match lookup {
        Ok(Some(expire)) if expire <= now => {
            debug!(%phase, address, %expire, "Account expired");
            Verdict::Reject(phase.reject_reason().to_string())
        }
        Ok(Some(expire)) => {
            debug!(%phase, address, %expire, "Account active");
            Verdict::Proceed
        }
        Ok(None) => {
            debug!(%phase, address, "No account record");
            Verdict::Proceed
        }
        Err(e) => {
            warn!(%phase, address, error = %e, "Expiry lookup failed, letting mail through");
            Verdict::Proceed
        }
    }
}
