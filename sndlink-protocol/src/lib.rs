//! # sndlink-protocol
//!
//! Wire protocol for the sndlink control channel.
//!
//! This crate provides:
//! - Fixed-size block frame parsing and construction
//! - The CRC-16 checksum used to seal a transfer
//! - The ASCII command grammar spoken over the control channel
//! - Reply rendering and parsing
//!
//! The control channel carries two kinds of traffic, distinguished purely by
//! the session state of the device: single-line ASCII commands while idle,
//! and back-to-back 64-byte binary frames while a transfer is streaming.

pub mod command;
pub mod crc;
pub mod error;
pub mod frame;
pub mod reply;

pub use command::{Command, Destination};
pub use crc::crc16;
pub use error::ProtocolError;
pub use frame::{Frame, FRAME_PAYLOAD_LEN, FRAME_PREFIX_LEN, FRAME_SIZE};
pub use reply::{format_fixed, Reply, Status};

/// Tag prepended to every reply line.
pub const REPLY_PREFIX: &str = "[LINK]:";

/// Line ending terminating every reply. The order is historical; host-side
/// tooling strips both characters, so it must not be "fixed" to `\r\n`.
pub const LINE_ENDING: &str = "\n\r";

/// Prefix of an end-of-stream frame.
pub const STOP_SENTINEL: &[u8; FRAME_PREFIX_LEN] = b"stop";

/// Prefix the host tool stamps on ordinary data frames. The device treats
/// any prefix other than [`STOP_SENTINEL`] as opaque.
pub const DATA_PREFIX: &[u8; FRAME_PREFIX_LEN] = b"data";

/// Byte used to pad a short final chunk up to a full frame.
pub const PAD_BYTE: u8 = b'0';
