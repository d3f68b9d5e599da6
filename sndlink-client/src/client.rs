//! Transfer driver.
//!
//! The exchange mirrors what the device's dispatcher expects: a `send`
//! command answered with `RDY`, one 64-byte frame per delivery each
//! answered with a bare `OK`, then the `stop` sentinel answered with
//! `FNSH: Transmission done. CRC: <n>`. Any other answer aborts the
//! transfer - there is no partial recovery, the whole payload is resent.

use crate::error::ClientError;
use bytes::BytesMut;
use sndlink_protocol::{
    crc16, frame, Destination, Reply, Status, FRAME_PAYLOAD_LEN, LINE_ENDING, PAD_BYTE,
};
use std::io::{Read, Write};
use tracing::{debug, trace};

/// Checksum the device will report for `data`: the CRC-16 over the payload
/// padded to whole frames, since the device accumulates full 60-byte frames
/// and never learns the original length.
pub fn padded_crc(data: &[u8]) -> u16 {
    let rem = data.len() % FRAME_PAYLOAD_LEN;
    if rem == 0 {
        return crc16(data);
    }
    let mut padded = data.to_vec();
    padded.resize(data.len() + (FRAME_PAYLOAD_LEN - rem), PAD_BYTE);
    crc16(&padded)
}

/// A connected control-channel client.
pub struct LinkClient<T: Read + Write> {
    io: T,
    rx: BytesMut,
}

impl<T: Read + Write> LinkClient<T> {
    pub fn new(io: T) -> Self {
        Self {
            io,
            rx: BytesMut::with_capacity(256),
        }
    }

    /// Sends one command line and waits for its reply. The line and its
    /// terminator go out in a single write so transports that map one write
    /// to one delivery callback see exactly one command.
    pub fn request(&mut self, line: &str) -> Result<Reply, ClientError> {
        trace!(line, "sending command");
        let mut out = Vec::with_capacity(line.len() + 1);
        out.extend_from_slice(line.as_bytes());
        out.push(b'\n');
        self.io.write_all(&out)?;
        self.io.flush()?;
        self.read_reply()
    }

    /// Streams `data` to the given destination and returns the checksum the
    /// device reported, after verifying it against the local computation.
    pub fn send(&mut self, data: &[u8], dest: Destination) -> Result<u16, ClientError> {
        let reply = self.request(&format!("send {}", dest.flag()))?;
        if reply.status != Status::Rdy {
            return Err(ClientError::Rejected {
                expected: "RDY",
                got: reply.render().trim_end().to_string(),
            });
        }

        let blocks = data.len().div_ceil(FRAME_PAYLOAD_LEN);
        for (i, chunk) in data.chunks(FRAME_PAYLOAD_LEN).enumerate() {
            let raw = frame::data_frame(chunk)?;
            self.io.write_all(&raw)?;
            self.io.flush()?;
            let reply = self.read_reply()?;
            if reply.status != Status::Ok {
                debug!(block = i + 1, blocks, "transfer aborted by device");
                return Err(ClientError::Rejected {
                    expected: "OK",
                    got: reply.render().trim_end().to_string(),
                });
            }
            trace!(block = i + 1, blocks, "block acknowledged");
        }

        self.io.write_all(&frame::stop_frame())?;
        self.io.flush()?;
        let reply = self.read_reply()?;
        if reply.status != Status::Fnsh {
            return Err(ClientError::Rejected {
                expected: "FNSH",
                got: reply.render().trim_end().to_string(),
            });
        }

        let detail = reply.detail.unwrap_or_default();
        let reported = detail
            .rsplit(' ')
            .next()
            .and_then(|token| token.parse::<u16>().ok())
            .ok_or_else(|| ClientError::MissingCrc {
                detail: detail.clone(),
            })?;

        let expected = padded_crc(data);
        if reported != expected {
            return Err(ClientError::ChecksumMismatch { expected, reported });
        }
        debug!(bytes = data.len(), blocks, crc = reported, "transfer verified");
        Ok(reported)
    }

    fn read_reply(&mut self) -> Result<Reply, ClientError> {
        loop {
            if let Some(pos) = self
                .rx
                .windows(LINE_ENDING.len())
                .position(|w| w == LINE_ENDING.as_bytes())
            {
                let line = self.rx.split_to(pos + LINE_ENDING.len());
                let text = String::from_utf8_lossy(&line).into_owned();
                self.rx.reserve(256);
                return Ok(Reply::parse(&text)?);
            }
            let mut chunk = [0u8; 256];
            let n = self.io.read(&mut chunk)?;
            if n == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "link closed while waiting for a reply",
                )
                .into());
            }
            self.rx.extend_from_slice(&chunk[..n]);
        }
    }
}
