//! Protocol violations

use filter_expired_common::Phase;
use thiserror::Error;

/// Fatal breach of the filter protocol.
///
/// None of these can be recovered from: the peer and the filter no longer
/// agree on what the stream means.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("missing atoms: {0}")]
    MissingAtoms(String),

    #[error("invalid stream: {0}")]
    InvalidStream(String),

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("missing parameters for {phase}: {line}")]
    MissingParameters { phase: Phase, line: String },

    #[error("output stream closed")]
    OutputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
