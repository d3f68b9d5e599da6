//! Bounded staging buffer.
//!
//! The staging region is allocated once and overwritten in place on each new
//! transfer; nothing is freed or reallocated for the process lifetime. The
//! write cursor is counted in whole frames. Bounds are checked before any
//! byte is copied, so an oversized transfer can never corrupt memory past
//! the region - it surfaces as an explicit [`OverflowError`].

use crate::error::OverflowError;
use crate::CRC_TRAILER_LEN;
use sndlink_protocol::{crc16, FRAME_PAYLOAD_LEN};

/// Fixed-capacity accumulation buffer for frame payloads.
pub struct StagingBuffer {
    /// Backing store: `capacity` payload bytes plus trailer headroom, so a
    /// transfer landing exactly on capacity can still be sealed.
    bytes: Box<[u8]>,
    capacity: usize,
    /// Write cursor in whole frames received.
    frames: usize,
}

impl StagingBuffer {
    /// Allocates a staging buffer of `capacity` payload bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity + CRC_TRAILER_LEN].into_boxed_slice(),
            capacity,
            frames: 0,
        }
    }

    /// Payload capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Frames accumulated since the last reset.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Payload bytes accumulated since the last reset.
    pub fn payload_len(&self) -> usize {
        self.frames * FRAME_PAYLOAD_LEN
    }

    /// Appends one frame's payload at the cursor.
    ///
    /// Rejects the payload without copying anything if it would land past
    /// capacity. The cursor is left untouched on rejection; the caller
    /// decides whether to abandon the transfer.
    pub fn push(&mut self, payload: &[u8]) -> Result<(), OverflowError> {
        debug_assert_eq!(payload.len(), FRAME_PAYLOAD_LEN);
        let offset = self.frames * FRAME_PAYLOAD_LEN;
        if offset + payload.len() > self.capacity {
            return Err(OverflowError {
                frames: self.frames + 1,
                capacity: self.capacity,
            });
        }
        self.bytes[offset..offset + payload.len()].copy_from_slice(payload);
        self.frames += 1;
        Ok(())
    }

    /// Seals the accumulated payload: computes the CRC-16 over it and writes
    /// the little-endian trailer immediately after the last payload byte.
    /// The cursor is not moved; read [`payload_len`](Self::payload_len)
    /// before [`reset`](Self::reset) to know the committed span.
    pub fn seal(&mut self) -> u16 {
        let len = self.payload_len();
        let crc = crc16(&self.bytes[..len]);
        self.bytes[len..len + CRC_TRAILER_LEN].copy_from_slice(&crc.to_le_bytes());
        crc
    }

    /// Resets the cursor for the next transfer. Contents stay in place until
    /// overwritten.
    pub fn reset(&mut self) {
        self.frames = 0;
    }

    /// The accumulated payload bytes.
    pub fn staged(&self) -> &[u8] {
        &self.bytes[..self.payload_len()]
    }

    /// The whole backing store, trailer headroom included. Commit padding
    /// reads from here, so bytes past the payload are whatever the buffer
    /// last held.
    pub fn raw(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(fill: u8) -> [u8; FRAME_PAYLOAD_LEN] {
        [fill; FRAME_PAYLOAD_LEN]
    }

    #[test]
    fn test_push_advances_cursor() {
        let mut buf = StagingBuffer::new(600);
        buf.push(&payload(1)).unwrap();
        buf.push(&payload(2)).unwrap();
        assert_eq!(buf.frames(), 2);
        assert_eq!(buf.payload_len(), 2 * FRAME_PAYLOAD_LEN);
        assert_eq!(buf.staged()[0], 1);
        assert_eq!(buf.staged()[FRAME_PAYLOAD_LEN], 2);
    }

    #[test]
    fn test_push_rejects_before_copying() {
        let mut buf = StagingBuffer::new(FRAME_PAYLOAD_LEN);
        buf.push(&payload(0xAA)).unwrap();
        let err = buf.push(&payload(0xBB)).unwrap_err();
        assert_eq!(
            err,
            OverflowError {
                frames: 2,
                capacity: FRAME_PAYLOAD_LEN
            }
        );
        // The rejected frame must not have leaked into the trailer headroom.
        assert_eq!(buf.frames(), 1);
        assert!(buf.staged().iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn test_exactly_full_is_legal_and_sealable() {
        let capacity = 3 * FRAME_PAYLOAD_LEN;
        let mut buf = StagingBuffer::new(capacity);
        for i in 0..3 {
            buf.push(&payload(i)).unwrap();
        }
        assert_eq!(buf.payload_len(), capacity);
        let crc = buf.seal();
        // Trailer sits in the headroom past the last payload byte.
        assert_eq!(&buf.raw()[capacity..capacity + 2], &crc.to_le_bytes());
    }

    #[test]
    fn test_seal_covers_exactly_the_payload() {
        let mut buf = StagingBuffer::new(600);
        buf.push(&payload(0x42)).unwrap();
        let crc = buf.seal();
        assert_eq!(crc, crc16(&[0x42u8; FRAME_PAYLOAD_LEN]));
    }

    #[test]
    fn test_seal_empty_is_seed() {
        let mut buf = StagingBuffer::new(600);
        assert_eq!(buf.seal(), 0xFFFF);
    }

    proptest::proptest! {
        #[test]
        fn prop_cursor_never_exceeds_capacity(
            capacity_frames in 1usize..32,
            pushes in 1usize..64,
        ) {
            let capacity = capacity_frames * FRAME_PAYLOAD_LEN;
            let mut buf = StagingBuffer::new(capacity);
            for i in 0..pushes {
                let result = buf.push(&payload(i as u8));
                proptest::prop_assert!(buf.payload_len() <= capacity);
                proptest::prop_assert_eq!(result.is_err(), i >= capacity_frames);
            }
        }
    }

    #[test]
    fn test_reset_reuses_storage_in_place() {
        let mut buf = StagingBuffer::new(600);
        buf.push(&payload(0x11)).unwrap();
        buf.reset();
        assert_eq!(buf.frames(), 0);
        buf.push(&payload(0x22)).unwrap();
        assert!(buf.staged().iter().all(|&b| b == 0x22));
    }
}
