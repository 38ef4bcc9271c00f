//! smtpd filter protocol
//!
//! Implements the line protocol OpenSMTPD uses to talk to filter processes
//! over stdin/stdout.

mod dispatch;
mod engine;
mod error;
mod handler;
mod handshake;
mod output;
mod parser;
mod reader;
mod response;
#[cfg(test)]
mod testing;

pub use dispatch::DispatchTable;
pub use engine::FilterEngine;
pub use error::ProtocolError;
pub use handler::{DecisionHandler, ExpiryCheck};
pub use output::{OutputSink, OutputTask};
pub use parser::FilterEvent;
pub use response::FILTER_RESULT;
