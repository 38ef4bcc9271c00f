//! Phase dispatch table

use super::error::ProtocolError;
use super::handler::{DecisionHandler, ExpiryCheck};
use super::parser::FilterEvent;
use filter_expired_common::{Phase, SessionContext, Verdict};
use filter_expired_storage::ExpiryRepository;
use std::sync::Arc;

/// Maps phase names to their handlers. Fixed once built.
pub struct DispatchTable {
    handlers: Vec<Box<dyn DecisionHandler>>,
}

impl DispatchTable {
    /// Table from an explicit handler list
    pub fn new(handlers: Vec<Box<dyn DecisionHandler>>) -> Self {
        Self { handlers }
    }

    /// Expiry checks for every supported phase, sharing one store
    pub fn expiry_checks(store: Arc<dyn ExpiryRepository>) -> Self {
        Self::new(
            Phase::ALL
                .into_iter()
                .map(|phase| {
                    Box::new(ExpiryCheck::new(phase, store.clone())) as Box<dyn DecisionHandler>
                })
                .collect(),
        )
    }

    /// Registered phases, in registration order
    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.handlers.iter().map(|handler| handler.phase())
    }

    /// Handler for a wire phase name
    pub fn lookup(&self, name: &str) -> Option<&dyn DecisionHandler> {
        let phase = Phase::parse(name)?;
        self.handlers
            .iter()
            .find(|handler| handler.phase() == phase)
            .map(|handler| &**handler)
    }

    /// Route an event to its handler.
    ///
    /// Parameter 0 is the token to echo back, parameter 1 the address.
    pub async fn dispatch(
        &self,
        event: &FilterEvent<'_>,
        line: &str,
    ) -> Result<(SessionContext, Verdict), ProtocolError> {
        let handler = self
            .lookup(event.phase)
            .ok_or_else(|| ProtocolError::InvalidPhase(event.phase.to_string()))?;

        let (token, address) = match event.params.as_slice() {
            [token, address, ..] => (*token, *address),
            _ => {
                return Err(ProtocolError::MissingParameters {
                    phase: handler.phase(),
                    line: line.to_string(),
                })
            }
        };

        let verdict = handler.decide(address).await;
        Ok((SessionContext::new(event.session_id, token), verdict))
    }
}
