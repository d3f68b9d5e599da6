//! ASCII command grammar.
//!
//! Commands are single lines tokenized on spaces. Parsing is pure: the input
//! is never mutated and the result is a typed [`Command`] value, so the
//! grammar can be unit tested without a transport or a device behind it.

use crate::error::ProtocolError;

/// Where an armed transfer lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Volatile staging memory (SDRAM).
    Sdram,
    /// Non-volatile storage behind the QSPI flash controller.
    Qspi,
}

impl Destination {
    /// The wire flag selecting this destination.
    pub fn flag(&self) -> &'static str {
        match self {
            Destination::Sdram => "--sdram",
            Destination::Qspi => "--qspi",
        }
    }
}

/// A parsed control-channel command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `get <sub>` - read a named value from the device.
    Get { key: &'a str },
    /// `set ...` - accepted by the grammar but intentionally inert; the
    /// device always answers that setters are not implemented. The verb is
    /// kept so existing tooling gets a parseable reply rather than an
    /// unknown-command echo.
    Set,
    /// `reset` - trigger the external reset hook.
    Reset,
    /// `send [flag]` - arm a block transfer. `--qspi` selects the durable
    /// destination; any other flag, or none, selects volatile staging.
    Send { dest: Destination },
}

impl<'a> Command<'a> {
    /// Parses one command line.
    pub fn parse(line: &'a str) -> Result<Self, ProtocolError> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().ok_or(ProtocolError::EmptyCommand)?;

        match verb {
            "get" => {
                let key = tokens
                    .next()
                    .ok_or(ProtocolError::MissingArgument { verb: "get" })?;
                Ok(Command::Get { key })
            }
            "set" => Ok(Command::Set),
            "reset" => Ok(Command::Reset),
            "send" => {
                let dest = match tokens.next() {
                    Some("--qspi") => Destination::Qspi,
                    _ => Destination::Sdram,
                };
                Ok(Command::Send { dest })
            }
            other => Err(ProtocolError::UnknownCommand {
                token: other.to_string(),
            }),
        }
    }
}
