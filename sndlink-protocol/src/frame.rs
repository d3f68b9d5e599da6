//! Block frame format.
//!
//! Frames are fixed-size and purely positional; there is no length field and
//! no separator between frames:
//!
//! ```text
//! +----------+---------------------------+
//! | prefix   | payload                   |
//! | 4 bytes  | 60 bytes                  |
//! +----------+---------------------------+
//! ```
//!
//! The prefix is either the ASCII sentinel `"stop"` marking end-of-stream or
//! an opaque field the receiver ignores. Host tooling stamps `"data"` there
//! and pads a short final chunk with `'0'` bytes.

use crate::error::ProtocolError;
use crate::{DATA_PREFIX, PAD_BYTE, STOP_SENTINEL};

/// Total frame size in bytes.
pub const FRAME_SIZE: usize = 64;

/// Length of the frame prefix.
pub const FRAME_PREFIX_LEN: usize = 4;

/// Payload bytes carried per frame.
pub const FRAME_PAYLOAD_LEN: usize = FRAME_SIZE - FRAME_PREFIX_LEN;

/// A borrowed view over one received frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    raw: &'a [u8; FRAME_SIZE],
}

impl<'a> Frame<'a> {
    /// Wraps a full frame's worth of bytes.
    pub fn new(raw: &'a [u8; FRAME_SIZE]) -> Self {
        Self { raw }
    }

    /// The first [`FRAME_PREFIX_LEN`] bytes.
    pub fn prefix(&self) -> &'a [u8] {
        &self.raw[..FRAME_PREFIX_LEN]
    }

    /// The payload bytes following the prefix.
    pub fn payload(&self) -> &'a [u8] {
        &self.raw[FRAME_PREFIX_LEN..]
    }

    /// Whether this frame is the end-of-stream sentinel. The match is an
    /// exact, case-sensitive comparison of the prefix bytes.
    pub fn is_stop(&self) -> bool {
        self.prefix() == STOP_SENTINEL
    }
}

/// Builds a data frame around `chunk`, padding up to the full frame size.
///
/// `chunk` may be shorter than [`FRAME_PAYLOAD_LEN`] (the final chunk of a
/// payload usually is); the remainder is filled with [`PAD_BYTE`]. A longer
/// chunk is rejected.
pub fn data_frame(chunk: &[u8]) -> Result<[u8; FRAME_SIZE], ProtocolError> {
    if chunk.len() > FRAME_PAYLOAD_LEN {
        return Err(ProtocolError::OversizedChunk { len: chunk.len() });
    }
    let mut frame = [PAD_BYTE; FRAME_SIZE];
    frame[..FRAME_PREFIX_LEN].copy_from_slice(DATA_PREFIX);
    frame[FRAME_PREFIX_LEN..FRAME_PREFIX_LEN + chunk.len()].copy_from_slice(chunk);
    Ok(frame)
}

/// Builds the end-of-stream sentinel frame.
pub fn stop_frame() -> [u8; FRAME_SIZE] {
    let mut frame = [PAD_BYTE; FRAME_SIZE];
    frame[..FRAME_PREFIX_LEN].copy_from_slice(STOP_SENTINEL);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_payload_split() {
        let mut raw = [0u8; FRAME_SIZE];
        raw[..4].copy_from_slice(b"data");
        raw[4] = 0xAB;
        let frame = Frame::new(&raw);
        assert_eq!(frame.prefix(), b"data");
        assert_eq!(frame.payload().len(), FRAME_PAYLOAD_LEN);
        assert_eq!(frame.payload()[0], 0xAB);
        assert!(!frame.is_stop());
    }

    #[test]
    fn test_stop_detection_is_exact() {
        let stop = stop_frame();
        assert!(Frame::new(&stop).is_stop());

        let mut almost = stop_frame();
        almost[..4].copy_from_slice(b"Stop");
        assert!(!Frame::new(&almost).is_stop());
    }

    #[test]
    fn test_data_frame_pads_short_chunk() {
        let frame = data_frame(b"abc").unwrap();
        assert_eq!(&frame[..4], b"data");
        assert_eq!(&frame[4..7], b"abc");
        assert!(frame[7..].iter().all(|&b| b == PAD_BYTE));
    }

    #[test]
    fn test_data_frame_full_chunk() {
        let chunk = [0x55u8; FRAME_PAYLOAD_LEN];
        let frame = data_frame(&chunk).unwrap();
        assert_eq!(&frame[FRAME_PREFIX_LEN..], &chunk[..]);
    }

    #[test]
    fn test_data_frame_rejects_oversized_chunk() {
        let chunk = [0u8; FRAME_PAYLOAD_LEN + 1];
        let result = data_frame(&chunk);
        assert!(matches!(
            result,
            Err(ProtocolError::OversizedChunk { len }) if len == FRAME_PAYLOAD_LEN + 1
        ));
    }
}
