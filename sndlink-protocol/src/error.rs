//! Protocol error types.

use thiserror::Error;

/// Errors produced while parsing commands, frames, or reply lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty command line")]
    EmptyCommand,

    #[error("unknown command <{token}>")]
    UnknownCommand { token: String },

    #[error("missing argument for <{verb}>")]
    MissingArgument { verb: &'static str },

    #[error("command line is not valid ASCII text")]
    InvalidText,

    #[error("chunk of {len} bytes does not fit a single frame")]
    OversizedChunk { len: usize },

    #[error("malformed reply line: {line:?}")]
    MalformedReply { line: String },

    #[error("unknown reply status <{token}>")]
    UnknownStatus { token: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_offending_token() {
        let err = ProtocolError::UnknownCommand {
            token: "foo".to_string(),
        };
        assert!(err.to_string().contains("foo"));

        let err = ProtocolError::MissingArgument { verb: "get" };
        assert!(err.to_string().contains("get"));

        let err = ProtocolError::UnknownStatus {
            token: "NOPE".to_string(),
        };
        assert!(err.to_string().contains("NOPE"));
    }
}
