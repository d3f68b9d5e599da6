//! Reply lines and value rendering.
//!
//! Every exchange on the control channel is answered with one line of the
//! form `<prefix> <STATUS>` or `<prefix> <STATUS>: <detail>`, terminated by
//! [`LINE_ENDING`](crate::LINE_ENDING). Host tooling string-matches these
//! lines, so rendering is part of the wire contract.

use crate::error::ProtocolError;
use crate::{LINE_ENDING, REPLY_PREFIX};
use std::fmt;
use std::str::FromStr;

/// Reply status keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Err,
    Warn,
    Rdy,
    Fnsh,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Err => write!(f, "ERR"),
            Status::Warn => write!(f, "WARN"),
            Status::Rdy => write!(f, "RDY"),
            Status::Fnsh => write!(f, "FNSH"),
        }
    }
}

impl FromStr for Status {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, ProtocolError> {
        match s {
            "OK" => Ok(Status::Ok),
            "ERR" => Ok(Status::Err),
            "WARN" => Ok(Status::Warn),
            "RDY" => Ok(Status::Rdy),
            "FNSH" => Ok(Status::Fnsh),
            other => Err(ProtocolError::UnknownStatus {
                token: other.to_string(),
            }),
        }
    }
}

/// One reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: Status,
    pub detail: Option<String>,
}

impl Reply {
    /// Bare `OK` with no detail.
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            detail: None,
        }
    }

    /// `OK` carrying a detail string.
    pub fn ok_with(detail: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            detail: Some(detail.into()),
        }
    }

    /// `ERR` carrying a detail string.
    pub fn err(detail: impl Into<String>) -> Self {
        Self {
            status: Status::Err,
            detail: Some(detail.into()),
        }
    }

    /// `RDY` carrying a detail string.
    pub fn rdy(detail: impl Into<String>) -> Self {
        Self {
            status: Status::Rdy,
            detail: Some(detail.into()),
        }
    }

    /// `FNSH` carrying a detail string.
    pub fn fnsh(detail: impl Into<String>) -> Self {
        Self {
            status: Status::Fnsh,
            detail: Some(detail.into()),
        }
    }

    /// Renders the full wire line, line ending included.
    pub fn render(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{REPLY_PREFIX} {}: {detail}{LINE_ENDING}", self.status),
            None => format!("{REPLY_PREFIX} {}{LINE_ENDING}", self.status),
        }
    }

    /// Parses a reply line as received from the device. Leading and trailing
    /// line-ending characters are tolerated.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let trimmed = line.trim_matches(|c: char| c == '\r' || c == '\n' || c == ' ');
        let rest = trimmed
            .strip_prefix(REPLY_PREFIX)
            .ok_or_else(|| ProtocolError::MalformedReply {
                line: trimmed.to_string(),
            })?
            .trim_start();

        match rest.split_once(": ") {
            Some((status, detail)) => Ok(Self {
                status: status.parse()?,
                detail: Some(detail.to_string()),
            }),
            None => Ok(Self {
                status: rest.parse()?,
                detail: None,
            }),
        }
    }
}

/// Renders a value with a fixed number of decimal digits, truncating (not
/// rounding) the fractional part. Negative values get a leading `-` and the
/// absolute magnitude. Host-side parsers depend on this exact behavior, so
/// it must not be replaced with `format!("{:.N}")`, which rounds.
pub fn format_fixed(value: f32, decimals: u32) -> String {
    let scale = 10u64.pow(decimals);
    let sign = if value < 0.0 { "-" } else { "" };
    let scaled = (f64::from(value).abs() * scale as f64) as u64;
    let whole = scaled / scale;
    let frac = scaled % scale;
    if decimals == 0 {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac:0width$}", width = decimals as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bare_status() {
        assert_eq!(Reply::ok().render(), "[LINK]: OK\n\r");
    }

    #[test]
    fn test_render_with_detail() {
        let reply = Reply::fnsh("Transmission done. CRC: 4660");
        assert_eq!(
            reply.render(),
            "[LINK]: FNSH: Transmission done. CRC: 4660\n\r"
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        let replies = [
            Reply::ok(),
            Reply::err("Parse error: unknown command <foo>"),
            Reply::rdy("Awaiting data transfer to SDRAM..."),
            Reply::fnsh("Transmission done. CRC: 65535"),
        ];
        for reply in replies {
            assert_eq!(Reply::parse(&reply.render()).unwrap(), reply);
        }
    }

    #[test]
    fn test_parse_rejects_foreign_line() {
        assert!(matches!(
            Reply::parse("hello world\n"),
            Err(ProtocolError::MalformedReply { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        assert!(matches!(
            Reply::parse("[LINK]: HUH\n\r"),
            Err(ProtocolError::UnknownStatus { .. })
        ));
    }

    #[test]
    fn test_format_fixed_truncates() {
        assert_eq!(format_fixed(1.999, 2), "1.99");
        assert_eq!(format_fixed(0.5, 3), "0.500");
        assert_eq!(format_fixed(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_fixed_negative() {
        assert_eq!(format_fixed(-1.25, 2), "-1.25");
        assert_eq!(format_fixed(-0.001, 2), "-0.00");
    }

    #[test]
    fn test_format_fixed_zero_decimals() {
        assert_eq!(format_fixed(12.75, 0), "12");
        assert_eq!(format_fixed(-3.9, 0), "-3");
    }
}
