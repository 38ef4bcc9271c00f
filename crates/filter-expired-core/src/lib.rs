//! filter-expired Core - OpenSMTPD filter protocol engine
//!
//! This crate speaks the smtpd filter protocol on a pair of byte streams:
//! it performs the startup handshake, decodes `filter|...` events, asks the
//! expiry store for a verdict and answers with `filter-result` lines.

pub mod filter;

pub use filter::{
    DecisionHandler, DispatchTable, ExpiryCheck, FilterEngine, FilterEvent, OutputSink,
    ProtocolError,
};
