//! Client error types.

use sndlink_protocol::ProtocolError;
use thiserror::Error;

/// Errors surfaced while driving the control channel.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("device answered {got:?} where {expected} was expected")]
    Rejected { expected: &'static str, got: String },

    #[error("completion reply carries no parseable checksum: {detail:?}")]
    MissingCrc { detail: String },

    #[error("checksum mismatch: sent payload hashes to {expected}, device reported {reported}")]
    ChecksumMismatch { expected: u16, reported: u16 },
}
